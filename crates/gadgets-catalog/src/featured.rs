use rand::seq::SliceRandom;
use rand::Rng;

use gadgets_core::ProductSummary;

/// Shuffles `products` and keeps at most `limit` of them.
pub fn select_featured<G: Rng + ?Sized>(
    mut products: Vec<ProductSummary>,
    limit: usize,
    rng: &mut G,
) -> Vec<ProductSummary> {
    products.shuffle(rng);
    products.truncate(limit);
    products
}

/// [`select_featured`] with the thread-local RNG.
pub(crate) fn shuffle_featured(products: Vec<ProductSummary>, limit: usize) -> Vec<ProductSummary> {
    select_featured(products, limit, &mut rand::rng())
}
