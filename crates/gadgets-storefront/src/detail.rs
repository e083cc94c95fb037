use gadgets_catalog::{ResolvedProduct, VariantChange};
use gadgets_core::{ImageCursorInit, ProductDetails, ProductSummary};

use crate::cart::Cart;
use crate::favorites::Favorites;

/// The resolved variant plus the gallery cursor the product page renders.
///
/// Cart and favorites are passed in per call and never mirrored here.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailViewModel {
    resolved: ResolvedProduct,
    selected_image: String,
}

impl DetailViewModel {
    #[must_use]
    pub fn new(resolved: ResolvedProduct, cursor: ImageCursorInit) -> Self {
        let selected_image = match cursor {
            ImageCursorInit::SummaryImage => resolved.summary.image.clone(),
            ImageCursorInit::DetailsPrimary => resolved
                .details
                .primary_image()
                .unwrap_or(&resolved.summary.image)
                .to_owned(),
        };
        Self {
            resolved,
            selected_image,
        }
    }

    #[must_use]
    pub fn summary(&self) -> &ProductSummary {
        &self.resolved.summary
    }

    #[must_use]
    pub fn details(&self) -> &ProductDetails {
        &self.resolved.details
    }

    #[must_use]
    pub fn resolved(&self) -> &ResolvedProduct {
        &self.resolved
    }

    #[must_use]
    pub fn selected_image(&self) -> &str {
        &self.selected_image
    }

    /// Moves the cursor. Paths outside the gallery are accepted as-is.
    pub fn select_image(&mut self, image: impl Into<String>) {
        self.selected_image = image.into();
    }

    #[must_use]
    pub fn is_added_to_cart<C: Cart + ?Sized>(&self, cart: &C) -> bool {
        cart.is_in_cart(self.summary())
    }

    #[must_use]
    pub fn is_favorited<F: Favorites + ?Sized>(&self, favorites: &F) -> bool {
        favorites.is_in_favorites(self.summary())
    }

    pub fn add_to_cart<C: Cart + ?Sized>(&self, cart: &mut C) {
        cart.handle_cart(self.summary());
    }

    pub fn toggle_favorite<F: Favorites + ?Sized>(&self, favorites: &mut F) {
        favorites.handle_favorites(self.summary());
    }

    #[must_use]
    pub fn color_path(&self, color: &str) -> String {
        self.resolved.sibling_path(&VariantChange::color(color))
    }

    #[must_use]
    pub fn capacity_path(&self, capacity: &str) -> String {
        self.resolved.sibling_path(&VariantChange::capacity(capacity))
    }
}

#[cfg(test)]
mod tests {
    use gadgets_core::ProductType;
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::InMemoryCart;
    use crate::favorites::InMemoryFavorites;

    fn resolved(images: Vec<&str>) -> ResolvedProduct {
        ResolvedProduct {
            summary: ProductSummary::new("iphone-10-64gb-black", ProductType::Phone, "summary.jpg"),
            details: ProductDetails {
                id: "iphone-10-64gb-black".into(),
                namespace_id: "iphone-10".into(),
                name: "iPhone 10".into(),
                capacity: "64gb".into(),
                color: "black".into(),
                capacity_available: vec!["64gb".into(), "128gb".into()],
                colors_available: vec!["black".into(), "red".into()],
                price_regular: Decimal::new(999, 0),
                price_discount: Decimal::new(899, 0),
                images: images.into_iter().map(str::to_owned).collect(),
                screen: String::new(),
                resolution: String::new(),
                processor: String::new(),
                ram: String::new(),
                camera: None,
                zoom: None,
                cell: vec![],
                description: vec![],
            },
        }
    }

    // The legacy storefront starts on the summary image even when the gallery
    // has its own first image. Both cursor policies are pinned here.
    #[test]
    fn summary_policy_starts_on_summary_image() {
        let vm = DetailViewModel::new(
            resolved(vec!["00.jpg", "01.jpg"]),
            ImageCursorInit::SummaryImage,
        );
        assert_eq!(vm.selected_image(), "summary.jpg");
    }

    #[test]
    fn details_policy_starts_on_first_gallery_image() {
        let vm = DetailViewModel::new(
            resolved(vec!["00.jpg", "01.jpg"]),
            ImageCursorInit::DetailsPrimary,
        );
        assert_eq!(vm.selected_image(), "00.jpg");
    }

    #[test]
    fn details_policy_falls_back_to_summary_for_empty_gallery() {
        let vm = DetailViewModel::new(resolved(vec![]), ImageCursorInit::DetailsPrimary);
        assert_eq!(vm.selected_image(), "summary.jpg");
    }

    #[test]
    fn select_image_accepts_paths_outside_gallery() {
        let mut vm = DetailViewModel::new(resolved(vec!["00.jpg"]), ImageCursorInit::default());
        vm.select_image("elsewhere.jpg");
        assert_eq!(vm.selected_image(), "elsewhere.jpg");
    }

    #[test]
    fn cart_and_favorites_are_delegated() {
        let vm = DetailViewModel::new(resolved(vec!["00.jpg"]), ImageCursorInit::default());
        let mut cart = InMemoryCart::new();
        let mut favorites = InMemoryFavorites::new();

        assert!(!vm.is_added_to_cart(&cart));
        vm.add_to_cart(&mut cart);
        assert!(vm.is_added_to_cart(&cart));
        assert_eq!(cart.items()[0].product.item_id, "iphone-10-64gb-black");

        vm.toggle_favorite(&mut favorites);
        assert!(vm.is_favorited(&favorites));
        vm.toggle_favorite(&mut favorites);
        assert!(!vm.is_favorited(&favorites));
    }

    #[test]
    fn sibling_paths_use_summary_category() {
        let vm = DetailViewModel::new(resolved(vec![]), ImageCursorInit::default());
        assert_eq!(vm.color_path("red"), "/phone/iphone-10-64gb-red");
        assert_eq!(vm.capacity_path("128gb"), "/phone/iphone-10-128gb-black");
    }
}
