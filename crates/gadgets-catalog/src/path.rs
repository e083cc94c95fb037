use gadgets_core::ProductType;

/// The two pieces of a product URL the resolver needs.
///
/// For `/{category}/{namespaceId}-{capacity}-{color}` the category is the
/// first segment and the variant id is the whole last non-empty segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductPath {
    pub category: String,
    pub variant_id: String,
}

impl ProductPath {
    /// Splits a route path. Query strings and fragments are ignored.
    ///
    /// Never fails: a malformed path yields empty or unknown parts, which the
    /// resolver reports as an invalid category or a missing product.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        // Segment 1 of `split('/')`, so a leading slash is expected and a
        // doubled one leaves the category empty.
        let category = path.split('/').nth(1).unwrap_or_default().to_owned();
        let variant_id = path
            .split('/')
            .rfind(|segment| !segment.is_empty())
            .unwrap_or_default()
            .to_owned();

        Self {
            category,
            variant_id,
        }
    }

    #[must_use]
    pub fn product_type(&self) -> Option<ProductType> {
        ProductType::from_slug(&self.category)
    }
}

impl std::fmt::Display for ProductPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.category, self.variant_id)
    }
}
