use gadgets_core::ProductType;
use thiserror::Error;

/// Failure to obtain a catalog collection.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("collection not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid catalog base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("failed to read fixture {path}: {source}")]
    Fixture {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal outcome of resolving a variant path.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid category \"{0}\"")]
    InvalidCategory(String),

    #[error("no {0} details in the catalog")]
    DetailsNotFound(ProductType),

    #[error("no product with item id \"{0}\"")]
    SummaryNotFound(String),

    /// A summary row exists but its details row is missing or does not carry
    /// the same composite key. Points at inconsistent upstream data.
    #[error("details for \"{item_id}\" do not match: {reason}")]
    DetailsMismatch { item_id: String, reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ResolveError {
    /// Message shown on the product page's error panel.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::InvalidCategory(_) => "Invalid category",
            ResolveError::DetailsNotFound(_) => "Product details were not found...",
            ResolveError::SummaryNotFound(_) => "Could not find exact product...",
            ResolveError::DetailsMismatch { .. } => "Could not find details for the product...",
            ResolveError::Fetch(_) => "Error fetching product details",
        }
    }

    /// Stable machine-readable error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::InvalidCategory(_) => "invalid_category",
            ResolveError::DetailsNotFound(_) => "details_not_found",
            ResolveError::SummaryNotFound(_) => "summary_not_found",
            ResolveError::DetailsMismatch { .. } => "details_mismatch",
            ResolveError::Fetch(_) => "fetch_error",
        }
    }
}
