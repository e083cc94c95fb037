//! Resolution and navigation behaviour over in-memory catalogs.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use gadgets_catalog::{
    build_variant_path, resolve_path, FetchError, InMemoryCatalog, ProductRepository,
    ResolveError, VariantChange,
};
use gadgets_core::{ProductDetails, ProductSummary, ProductType};

/// Wraps a catalog and counts every fetch issued through it.
struct CountingRepository {
    inner: InMemoryCatalog,
    calls: AtomicUsize,
}

impl CountingRepository {
    fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProductRepository for CountingRepository {
    async fn fetch_details(&self, category: ProductType) -> Result<Vec<ProductDetails>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_details(category).await
    }

    async fn fetch_summaries(&self) -> Result<Vec<ProductSummary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_summaries().await
    }

    async fn fetch_featured(&self) -> Result<Vec<ProductSummary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_featured().await
    }
}

fn scenario_details() -> ProductDetails {
    ProductDetails {
        id: "iphone-10-64gb-black".into(),
        namespace_id: "iphone-10".into(),
        name: "iPhone 10".into(),
        capacity: "64gb".into(),
        color: "black".into(),
        capacity_available: vec!["64gb".into(), "128gb".into()],
        colors_available: vec!["black".into(), "red".into()],
        price_regular: Decimal::new(999, 0),
        price_discount: Decimal::new(899, 0),
        images: vec!["img1.jpg".into()],
        screen: String::new(),
        resolution: String::new(),
        processor: String::new(),
        ram: String::new(),
        camera: None,
        zoom: None,
        cell: vec![],
        description: vec![],
    }
}

fn scenario_catalog(details: Vec<ProductDetails>) -> InMemoryCatalog {
    InMemoryCatalog::new(vec![ProductSummary::new(
        "iphone-10-64gb-black",
        ProductType::Phone,
        "img1.jpg",
    )])
    .with_details(ProductType::Phone, details)
}

fn fixture_catalog() -> InMemoryCatalog {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("catalog");
    InMemoryCatalog::load_dir(&dir, 10).expect("failed to load fixture catalog")
}

#[tokio::test]
async fn scenario_resolves_and_navigates_to_red() {
    let catalog = scenario_catalog(vec![scenario_details()]);

    let resolved = resolve_path(&catalog, "/phones/iphone-10-64gb-black")
        .await
        .expect("scenario path should resolve");

    assert_eq!(resolved.summary.image, "img1.jpg");
    assert_eq!(
        resolved.sibling_path(&VariantChange::color("red")),
        "/phone/iphone-10-64gb-red"
    );
}

#[tokio::test]
async fn scenario_with_empty_details_fails_with_details_not_found() {
    let catalog = scenario_catalog(vec![]);

    let err = resolve_path(&catalog, "/phones/iphone-10-64gb-black")
        .await
        .unwrap_err();

    assert!(
        matches!(err, ResolveError::DetailsNotFound(ProductType::Phone)),
        "expected DetailsNotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn every_fixture_pair_resolves_with_equal_ids() {
    let catalog = fixture_catalog();
    let summaries = catalog.fetch_summaries().await.unwrap();

    for summary in &summaries {
        let path = format!("/{}/{}", summary.category, summary.item_id);
        let resolved = resolve_path(&catalog, &path)
            .await
            .unwrap_or_else(|e| panic!("{path} should resolve: {e}"));
        assert_eq!(resolved.summary.item_id, resolved.details.id, "{path}");
    }
}

#[tokio::test]
async fn absent_item_id_is_summary_not_found() {
    let catalog = fixture_catalog();

    for missing in ["apple-iphone-11-512gb-black", "nothing", ""] {
        let err = resolve_path(&catalog, &format!("/phone/{missing}"))
            .await
            .unwrap_err();
        // An empty last segment falls back to the category segment.
        let expected = if missing.is_empty() { "phone" } else { missing };
        assert!(
            matches!(err, ResolveError::SummaryNotFound(ref id) if id == expected),
            "expected SummaryNotFound({expected}), got: {err:?}"
        );
    }
}

#[tokio::test]
async fn unknown_category_fails_without_fetching() {
    let repo = CountingRepository::new(fixture_catalog());

    for category in ["laptops", "", "PHONEZ", "new"] {
        let err = resolve_path(&repo, &format!("/{category}/apple-iphone-11-64gb-black"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ResolveError::InvalidCategory(ref c) if c == category),
            "expected InvalidCategory({category}), got: {err:?}"
        );
    }

    assert_eq!(repo.calls(), 0, "no fetch may be issued for an unknown category");
}

#[tokio::test]
async fn summary_without_details_row_is_mismatch() {
    let catalog = InMemoryCatalog::new(vec![
        ProductSummary::new("iphone-10-64gb-black", ProductType::Phone, "img1.jpg"),
        ProductSummary::new("iphone-10-64gb-gold", ProductType::Phone, "img9.jpg"),
    ])
    .with_details(ProductType::Phone, vec![scenario_details()]);

    let err = resolve_path(&catalog, "/phone/iphone-10-64gb-gold")
        .await
        .unwrap_err();

    assert!(
        matches!(err, ResolveError::DetailsMismatch { ref item_id, .. } if item_id == "iphone-10-64gb-gold"),
        "expected DetailsMismatch, got: {err:?}"
    );
}

#[tokio::test]
async fn color_navigation_round_trips_through_resolution() {
    let catalog = fixture_catalog();
    let summaries = catalog.fetch_summaries().await.unwrap();

    for summary in &summaries {
        let path = format!("/{}/{}", summary.category, summary.item_id);
        let resolved = resolve_path(&catalog, &path).await.unwrap();

        for color in &resolved.details.colors_available {
            let next = build_variant_path(
                resolved.category(),
                &resolved.details,
                &VariantChange::color(color.clone()),
            );
            let sibling = resolve_path(&catalog, &next)
                .await
                .unwrap_or_else(|e| panic!("{next} should resolve: {e}"));

            assert_eq!(&sibling.details.color, color, "{next}");
            assert_eq!(sibling.details.capacity, resolved.details.capacity, "{next}");
            assert_eq!(sibling.details.namespace_id, resolved.details.namespace_id, "{next}");
        }
    }
}

#[tokio::test]
async fn capacity_navigation_round_trips_through_resolution() {
    let catalog = fixture_catalog();
    let resolved = resolve_path(&catalog, "/tablet/apple-ipad-air-4th-gen-64gb-green")
        .await
        .unwrap();

    for capacity in &resolved.details.capacity_available {
        let next = resolved.sibling_path(&VariantChange::capacity(capacity.clone()));
        let sibling = resolve_path(&catalog, &next).await.unwrap();
        assert_eq!(&sibling.details.capacity, capacity);
        assert_eq!(sibling.details.color, "green");
    }
}

#[tokio::test]
async fn unavailable_combination_surfaces_downstream() {
    let catalog = scenario_catalog(vec![scenario_details()]);
    let resolved = resolve_path(&catalog, "/phone/iphone-10-64gb-black")
        .await
        .unwrap();

    let next = resolved.sibling_path(&VariantChange::color("red"));
    let err = resolve_path(&catalog, &next).await.unwrap_err();

    assert!(
        matches!(err, ResolveError::SummaryNotFound(ref id) if id == "iphone-10-64gb-red"),
        "expected SummaryNotFound, got: {err:?}"
    );
}
