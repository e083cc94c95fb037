use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storefront category a product belongs to.
///
/// The canonical slug is what the storefront writes into URLs; plural and
/// singular spellings seen in older links and feeds are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "phone", alias = "phones")]
    Phone,
    #[serde(rename = "tablet", alias = "tablets")]
    Tablet,
    #[serde(rename = "accessories", alias = "accessory")]
    Accessories,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Phone,
        ProductType::Tablet,
        ProductType::Accessories,
    ];

    #[must_use]
    pub fn as_slug(self) -> &'static str {
        match self {
            ProductType::Phone => "phone",
            ProductType::Tablet => "tablet",
            ProductType::Accessories => "accessories",
        }
    }

    /// Parses a URL segment into a category. Matching is case-insensitive.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "phone" | "phones" => Some(ProductType::Phone),
            "tablet" | "tablets" => Some(ProductType::Tablet),
            "accessories" | "accessory" => Some(ProductType::Accessories),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_slug())
    }
}

/// One sellable variant in the flat, cross-category product list.
///
/// This is the identity record the cart and favorites are keyed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Composite `{namespaceId}-{capacity}-{color}` key, e.g. `"apple-iphone-11-64gb-black"`.
    pub item_id: String,
    pub category: ProductType,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl ProductSummary {
    /// Builds a summary with only the identity fields set.
    #[must_use]
    pub fn new(item_id: impl Into<String>, category: ProductType, image: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            category,
            image: image.into(),
            name: None,
            full_price: None,
            price: None,
            screen: None,
            capacity: None,
            color: None,
            ram: None,
            year: None,
        }
    }
}

/// A titled block of the "About" copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionSection {
    pub title: String,
    pub text: Vec<String>,
}

/// Rich per-variant record from a category collection.
///
/// `id` is expected to equal the matching [`ProductSummary::item_id`], and
/// both are expected to equal [`ProductDetails::variant_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub id: String,
    /// Shared by every color/capacity variant of one product family.
    pub namespace_id: String,
    pub name: String,
    pub capacity: String,
    pub color: String,
    #[serde(default)]
    pub capacity_available: Vec<String>,
    #[serde(default)]
    pub colors_available: Vec<String>,
    pub price_regular: Decimal,
    pub price_discount: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub screen: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub processor: String,
    #[serde(default)]
    pub ram: String,
    // Accessories carry neither camera nor zoom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<String>,
    #[serde(default)]
    pub cell: Vec<String>,
    #[serde(default)]
    pub description: Vec<DescriptionSection>,
}

impl ProductDetails {
    /// Returns the lowercase `{namespaceId}-{capacity}-{color}` key this
    /// variant is addressed by in URLs and in the summary list.
    #[must_use]
    pub fn variant_key(&self) -> String {
        variant_key(&self.namespace_id, &self.capacity, &self.color)
    }

    /// Returns the first gallery image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns the supported cellular standards as one display string.
    #[must_use]
    pub fn cell_summary(&self) -> String {
        self.cell.join(", ")
    }
}

/// Builds the lowercase composite variant key.
#[must_use]
pub fn variant_key(namespace_id: &str, capacity: &str, color: &str) -> String {
    format!("{namespace_id}-{capacity}-{color}").to_lowercase()
}
