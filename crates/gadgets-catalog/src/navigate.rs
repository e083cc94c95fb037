//! Canonical paths for sibling variants.
//!
//! The navigator does not check that the requested combination exists.
//! The path it returns goes back through resolution, which reports an
//! unavailable combination as a missing or mismatched product.

use serde::Deserialize;

use gadgets_core::products::variant_key;
use gadgets_core::{ProductDetails, ProductType};

/// Which variant attributes to swap. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VariantChange {
    pub color: Option<String>,
    pub capacity: Option<String>,
}

impl VariantChange {
    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            capacity: None,
        }
    }

    #[must_use]
    pub fn capacity(capacity: impl Into<String>) -> Self {
        Self {
            color: None,
            capacity: Some(capacity.into()),
        }
    }
}

/// Builds `/{category}/{namespaceId}-{capacity}-{color}` in lowercase.
#[must_use]
pub fn build_variant_path(
    category: ProductType,
    details: &ProductDetails,
    change: &VariantChange,
) -> String {
    let capacity = change.capacity.as_deref().unwrap_or(&details.capacity);
    let color = change.color.as_deref().unwrap_or(&details.color);
    format!(
        "/{}/{}",
        category.as_slug(),
        variant_key(&details.namespace_id, capacity, color)
    )
}
