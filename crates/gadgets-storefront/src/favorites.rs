use gadgets_core::ProductSummary;

/// Favorites membership, keyed by [`ProductSummary::item_id`].
pub trait Favorites {
    fn is_in_favorites(&self, product: &ProductSummary) -> bool;

    /// Adds the product if absent, removes it if present.
    fn handle_favorites(&mut self, product: &ProductSummary);
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFavorites {
    items: Vec<ProductSummary>,
}

impl InMemoryFavorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }
}

impl Favorites for InMemoryFavorites {
    fn is_in_favorites(&self, product: &ProductSummary) -> bool {
        self.items.iter().any(|p| p.item_id == product.item_id)
    }

    fn handle_favorites(&mut self, product: &ProductSummary) {
        let before = self.items.len();
        self.items.retain(|p| p.item_id != product.item_id);
        if self.items.len() == before {
            self.items.push(product.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use gadgets_core::ProductType;

    use super::*;

    #[test]
    fn handle_favorites_toggles() {
        let mut favorites = InMemoryFavorites::new();
        let watch = ProductSummary::new("watch-40mm-gold", ProductType::Accessories, "w.webp");

        favorites.handle_favorites(&watch);
        assert!(favorites.is_in_favorites(&watch));
        assert_eq!(favorites.items().len(), 1);

        favorites.handle_favorites(&watch);
        assert!(!favorites.is_in_favorites(&watch));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut favorites = InMemoryFavorites::new();
        for id in ["c-1-x", "a-1-x", "b-1-x"] {
            favorites.handle_favorites(&ProductSummary::new(id, ProductType::Tablet, "t.webp"));
        }
        let ids: Vec<&str> = favorites.items().iter().map(|p| p.item_id.as_str()).collect();
        assert_eq!(ids, ["c-1-x", "a-1-x", "b-1-x"]);
    }
}
