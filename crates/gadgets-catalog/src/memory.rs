use std::path::Path;

use serde::de::DeserializeOwned;

use gadgets_core::{ProductDetails, ProductSummary, ProductType};

use crate::client::{details_file, SUMMARIES_FILE};
use crate::error::FetchError;
use crate::featured::shuffle_featured;
use crate::repository::ProductRepository;

/// A catalog held in memory.
///
/// Serves the same collections as [`crate::HttpCatalog`], either built up in
/// code or loaded once from a directory of catalog JSON files.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    summaries: Vec<ProductSummary>,
    phones: Vec<ProductDetails>,
    tablets: Vec<ProductDetails>,
    accessories: Vec<ProductDetails>,
    featured: Option<Vec<ProductSummary>>,
    featured_limit: usize,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(summaries: Vec<ProductSummary>) -> Self {
        Self {
            summaries,
            featured_limit: 10,
            ..Self::default()
        }
    }

    /// Replaces the detailed collection for `category`.
    #[must_use]
    pub fn with_details(mut self, category: ProductType, details: Vec<ProductDetails>) -> Self {
        *self.details_mut(category) = details;
        self
    }

    /// Pins the featured list instead of shuffling the summaries.
    #[must_use]
    pub fn with_featured(mut self, featured: Vec<ProductSummary>) -> Self {
        self.featured = Some(featured);
        self
    }

    #[must_use]
    pub fn with_featured_limit(mut self, limit: usize) -> Self {
        self.featured_limit = limit;
        self
    }

    /// Loads `products.json`, `phones.json`, `tablets.json` and
    /// `accessories.json` from `dir`.
    ///
    /// A missing category file loads as an empty collection; the summary
    /// file is required.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fixture`] if a file cannot be read and
    /// [`FetchError::Deserialize`] if one does not hold the expected array.
    pub fn load_dir(dir: &Path, featured_limit: usize) -> Result<Self, FetchError> {
        let summaries = read_collection(&dir.join(SUMMARIES_FILE))?;
        let mut catalog = Self::new(summaries).with_featured_limit(featured_limit);

        for category in ProductType::ALL {
            let path = dir.join(details_file(category));
            if path.exists() {
                *catalog.details_mut(category) = read_collection(&path)?;
            } else {
                tracing::warn!(path = %path.display(), "category fixture missing; serving empty collection");
            }
        }

        tracing::info!(
            dir = %dir.display(),
            summaries = catalog.summaries.len(),
            phones = catalog.phones.len(),
            tablets = catalog.tablets.len(),
            accessories = catalog.accessories.len(),
            "loaded catalog fixtures"
        );
        Ok(catalog)
    }

    fn details(&self, category: ProductType) -> &[ProductDetails] {
        match category {
            ProductType::Phone => &self.phones,
            ProductType::Tablet => &self.tablets,
            ProductType::Accessories => &self.accessories,
        }
    }

    fn details_mut(&mut self, category: ProductType) -> &mut Vec<ProductDetails> {
        match category {
            ProductType::Phone => &mut self.phones,
            ProductType::Tablet => &mut self.tablets,
            ProductType::Accessories => &mut self.accessories,
        }
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FetchError> {
    let content = std::fs::read_to_string(path).map_err(|e| FetchError::Fixture {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| FetchError::Deserialize {
        context: path.display().to_string(),
        source: e,
    })
}

impl ProductRepository for InMemoryCatalog {
    async fn fetch_details(&self, category: ProductType) -> Result<Vec<ProductDetails>, FetchError> {
        Ok(self.details(category).to_vec())
    }

    async fn fetch_summaries(&self) -> Result<Vec<ProductSummary>, FetchError> {
        Ok(self.summaries.clone())
    }

    async fn fetch_featured(&self) -> Result<Vec<ProductSummary>, FetchError> {
        match &self.featured {
            Some(pinned) => Ok(pinned.clone()),
            None => Ok(shuffle_featured(self.summaries.clone(), self.featured_limit)),
        }
    }
}
