//! HTTP client for the static storefront catalog.
//!
//! The catalog is a set of JSON arrays served from one base URL: the flat
//! summary list (`products.json`) plus one detailed collection per category.
//! Non-2xx statuses surface as typed [`FetchError`]s and are never retried.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use gadgets_core::{ProductDetails, ProductSummary, ProductType};

use crate::error::FetchError;
use crate::featured::shuffle_featured;
use crate::repository::ProductRepository;

pub(crate) const SUMMARIES_FILE: &str = "products.json";

/// Returns the collection file serving a category's detailed records.
pub(crate) fn details_file(category: ProductType) -> &'static str {
    match category {
        ProductType::Phone => "phones.json",
        ProductType::Tablet => "tablets.json",
        ProductType::Accessories => "accessories.json",
    }
}

/// HTTP-backed [`ProductRepository`].
///
/// Use [`HttpCatalog::new`] with the catalog root, e.g.
/// `https://cdn.example.com/api`, or point it at a wiremock server in tests.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    featured_limit: usize,
}

impl HttpCatalog {
    /// Creates a catalog client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        featured_limit: usize,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends the collection
        // file instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| FetchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            featured_limit,
        })
    }

    fn endpoint(&self, file: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(file)
            .map_err(|e| FetchError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{file}\": {e}"),
            })
    }

    /// Sends a GET for one collection file and decodes the JSON array.
    async fn fetch_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint(file)?;
        tracing::debug!(url = %url, "fetching catalog collection");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

impl ProductRepository for HttpCatalog {
    async fn fetch_details(&self, category: ProductType) -> Result<Vec<ProductDetails>, FetchError> {
        self.fetch_collection(details_file(category)).await
    }

    async fn fetch_summaries(&self) -> Result<Vec<ProductSummary>, FetchError> {
        self.fetch_collection(SUMMARIES_FILE).await
    }

    async fn fetch_featured(&self) -> Result<Vec<ProductSummary>, FetchError> {
        let all = self.fetch_summaries().await?;
        Ok(shuffle_featured(all, self.featured_limit))
    }
}
