use rust_decimal::Decimal;
use serde::Serialize;

use gadgets_core::ProductSummary;

/// Shopping cart membership, keyed by [`ProductSummary::item_id`].
pub trait Cart {
    fn is_in_cart(&self, product: &ProductSummary) -> bool;

    /// Adds the product if absent, removes it if present.
    fn handle_cart(&mut self, product: &ProductSummary);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub product: ProductSummary,
    pub quantity: u32,
}

/// Cart kept in process memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCart {
    items: Vec<CartItem>,
}

impl InMemoryCart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `price * quantity`; items without a price count as zero.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.product.price.unwrap_or_default() * Decimal::from(item.quantity))
            .sum()
    }

    /// Sets the quantity of a product already in the cart. Zero removes it.
    /// Returns `false` when the product is not in the cart.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) -> bool {
        let Some(index) = self.position(item_id) else {
            return false;
        };
        if quantity == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }
        true
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product.item_id == item_id)
    }
}

impl Cart for InMemoryCart {
    fn is_in_cart(&self, product: &ProductSummary) -> bool {
        self.position(&product.item_id).is_some()
    }

    fn handle_cart(&mut self, product: &ProductSummary) {
        match self.position(&product.item_id) {
            Some(index) => {
                self.items.remove(index);
            }
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use gadgets_core::ProductType;

    use super::*;

    fn product(id: &str, price: i64) -> ProductSummary {
        let mut p = ProductSummary::new(id, ProductType::Phone, format!("{id}.webp"));
        p.price = Some(Decimal::new(price, 0));
        p
    }

    #[test]
    fn handle_cart_toggles_membership() {
        let mut cart = InMemoryCart::new();
        let phone = product("iphone-10-64gb-black", 899);

        cart.handle_cart(&phone);
        assert!(cart.is_in_cart(&phone));

        cart.handle_cart(&phone);
        assert!(!cart.is_in_cart(&phone));
        assert!(cart.items().is_empty());
    }

    #[test]
    fn membership_is_keyed_by_item_id() {
        let mut cart = InMemoryCart::new();
        cart.handle_cart(&product("iphone-10-64gb-black", 899));

        let mut same_id = product("iphone-10-64gb-black", 1);
        same_id.image = "other.webp".into();
        assert!(cart.is_in_cart(&same_id));
        assert!(!cart.is_in_cart(&product("iphone-10-64gb-red", 899)));
    }

    #[test]
    fn totals_follow_quantities() {
        let mut cart = InMemoryCart::new();
        cart.handle_cart(&product("a-1-x", 100));
        cart.handle_cart(&product("b-1-x", 50));
        assert!(cart.set_quantity("a-1-x", 3));

        assert_eq!(cart.total_quantity(), 4);
        assert_eq!(cart.total_price(), Decimal::new(350, 0));
    }

    #[test]
    fn set_quantity_zero_removes_and_unknown_is_rejected() {
        let mut cart = InMemoryCart::new();
        cart.handle_cart(&product("a-1-x", 100));

        assert!(!cart.set_quantity("missing", 2));
        assert!(cart.set_quantity("a-1-x", 0));
        assert!(cart.items().is_empty());
    }
}
