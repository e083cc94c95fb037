//! Reconciles the summary list with a category's details collection.

use serde::Serialize;

use gadgets_core::{ProductDetails, ProductSummary, ProductType};

use crate::error::ResolveError;
use crate::navigate::{build_variant_path, VariantChange};
use crate::path::ProductPath;
use crate::repository::ProductRepository;

/// A summary row and the details row describing the same variant.
///
/// Only produced by [`resolve_variant`], which guarantees
/// `summary.item_id == details.id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedProduct {
    pub summary: ProductSummary,
    pub details: ProductDetails,
}

impl ResolvedProduct {
    #[must_use]
    pub fn category(&self) -> ProductType {
        self.summary.category
    }

    /// Path of the sibling variant reached by applying `change`.
    #[must_use]
    pub fn sibling_path(&self, change: &VariantChange) -> String {
        build_variant_path(self.category(), &self.details, change)
    }
}

/// Resolves a raw route path such as `/phone/apple-iphone-11-64gb-black`.
///
/// # Errors
///
/// See [`resolve_variant`].
pub async fn resolve_path<R: ProductRepository>(
    repo: &R,
    path: &str,
) -> Result<ResolvedProduct, ResolveError> {
    resolve_variant(repo, &ProductPath::parse(path)).await
}

/// Finds the summary and details rows for the variant a path addresses.
///
/// Duplicate ids resolve to the first row in collection order.
///
/// # Errors
///
/// - [`ResolveError::InvalidCategory`] if the category segment is unknown; no
///   fetch is issued.
/// - [`ResolveError::DetailsNotFound`] if the category collection is empty.
/// - [`ResolveError::SummaryNotFound`] if no summary has the variant id.
/// - [`ResolveError::DetailsMismatch`] if no details row carries the summary's
///   id, or the row's `{namespaceId}-{capacity}-{color}` key disagrees with it.
/// - [`ResolveError::Fetch`] if either collection cannot be fetched.
pub async fn resolve_variant<R: ProductRepository>(
    repo: &R,
    path: &ProductPath,
) -> Result<ResolvedProduct, ResolveError> {
    let category = path
        .product_type()
        .ok_or_else(|| ResolveError::InvalidCategory(path.category.clone()))?;

    let details = repo.fetch_details(category).await?;
    if details.is_empty() {
        return Err(ResolveError::DetailsNotFound(category));
    }

    let summaries = repo.fetch_summaries().await?;
    let summary = summaries
        .into_iter()
        .find(|s| s.item_id == path.variant_id)
        .ok_or_else(|| ResolveError::SummaryNotFound(path.variant_id.clone()))?;

    if summary.category != category {
        tracing::debug!(
            item_id = %summary.item_id,
            path_category = %category,
            summary_category = %summary.category,
            "summary category differs from path category"
        );
    }

    let details = details
        .into_iter()
        .find(|d| d.id == summary.item_id)
        .ok_or_else(|| ResolveError::DetailsMismatch {
            item_id: summary.item_id.clone(),
            reason: format!("no {category} details row with this id"),
        })?;

    let key = details.variant_key();
    if key != summary.item_id.to_lowercase() {
        tracing::warn!(
            item_id = %summary.item_id,
            variant_key = %key,
            "details row violates the composite id contract"
        );
        return Err(ResolveError::DetailsMismatch {
            item_id: summary.item_id,
            reason: format!("composite key is \"{key}\""),
        });
    }

    Ok(ResolvedProduct { summary, details })
}
