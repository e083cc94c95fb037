//! The data-source seam the resolver and the product page depend on.

use std::future::Future;

use gadgets_core::{ProductDetails, ProductSummary, ProductType};

use crate::error::FetchError;

/// Read access to the storefront catalog.
///
/// Every call goes to the source; implementations make no caching promise
/// beyond a single call. An empty collection is a valid result.
pub trait ProductRepository: Send + Sync {
    /// Fetches the detailed collection for one category.
    fn fetch_details(
        &self,
        category: ProductType,
    ) -> impl Future<Output = Result<Vec<ProductDetails>, FetchError>> + Send;

    /// Fetches the full, unfiltered summary list across all categories.
    fn fetch_summaries(
        &self,
    ) -> impl Future<Output = Result<Vec<ProductSummary>, FetchError>> + Send;

    /// Fetches a shuffled, bounded subset of summaries for recommendations.
    fn fetch_featured(
        &self,
    ) -> impl Future<Output = Result<Vec<ProductSummary>, FetchError>> + Send;
}
