//! Serializable shapes handed to the view layer.

use serde::Serialize;

use gadgets_core::{color_swatch, DescriptionSection, ProductSummary, ProductType};

use crate::cart::Cart;
use crate::detail::DetailViewModel;
use crate::favorites::Favorites;

pub const UNKNOWN_PRODUCT_NAME: &str = "???";
pub const ERROR_DESCRIPTION: &str = "Something went wrong...";
pub const RELATED_TITLE: &str = "You may also like";

/// The whole product page in one of its render states.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    Idle,
    Loading,
    Errored {
        breadcrumb: String,
        code: &'static str,
        message: &'static str,
        description: &'static str,
        related: Option<RelatedProducts>,
    },
    Ready {
        breadcrumb: String,
        detail: Box<ProductDetailView>,
        related: Option<RelatedProducts>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatedProducts {
    pub title: &'static str,
    pub products: Vec<ProductSummary>,
}

impl RelatedProducts {
    #[must_use]
    pub fn new(products: Vec<ProductSummary>) -> Self {
        Self {
            title: RELATED_TITLE,
            products,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailView {
    pub item_id: String,
    pub category: ProductType,
    pub name: String,
    pub main_image: String,
    pub gallery: Vec<GalleryImage>,
    pub colors: Vec<ColorOption>,
    pub capacities: Vec<CapacityOption>,
    pub price: PriceView,
    pub cart: CartButton,
    pub favorite: bool,
    pub highlights: Vec<SpecRow>,
    pub tech_specs: Vec<SpecRow>,
    pub about: Vec<DescriptionSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryImage {
    pub path: String,
    pub url: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorOption {
    pub color: String,
    pub swatch: Option<&'static str>,
    pub selected: bool,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapacityOption {
    pub capacity: String,
    pub selected: bool,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceView {
    pub current: String,
    pub regular: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartButton {
    pub in_cart: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecRow {
    pub title: &'static str,
    pub value: String,
}

fn asset_url(prefix: &str, path: &str) -> String {
    format!("{prefix}{path}")
}

impl ProductDetailView {
    /// Renders the detail section. Spec rows with no value (camera and zoom
    /// on accessories) are left out.
    pub fn render<C, F>(
        vm: &DetailViewModel,
        cart: &C,
        favorites: &F,
        asset_prefix: &str,
    ) -> Self
    where
        C: Cart + ?Sized,
        F: Favorites + ?Sized,
    {
        let details = vm.details();
        let in_cart = vm.is_added_to_cart(cart);

        let gallery = details
            .images
            .iter()
            .map(|image| GalleryImage {
                path: image.clone(),
                url: asset_url(asset_prefix, image),
                selected: image == vm.selected_image(),
            })
            .collect();

        let colors = details
            .colors_available
            .iter()
            .map(|color| ColorOption {
                color: color.clone(),
                swatch: color_swatch(color),
                selected: *color == details.color,
                path: vm.color_path(color),
            })
            .collect();

        let capacities = details
            .capacity_available
            .iter()
            .map(|capacity| CapacityOption {
                capacity: capacity.clone(),
                selected: *capacity == details.capacity,
                path: vm.capacity_path(capacity),
            })
            .collect();

        let highlights = vec![
            spec("Screen", &details.screen),
            spec("Resolution", &details.resolution),
            spec("Processor", &details.processor),
            spec("RAM", &details.ram),
        ];

        let mut tech_specs = highlights.clone();
        tech_specs.push(spec("Built in memory", &details.capacity));
        if let Some(camera) = &details.camera {
            tech_specs.push(spec("Camera", camera));
        }
        if let Some(zoom) = &details.zoom {
            tech_specs.push(spec("Zoom", zoom));
        }
        tech_specs.push(SpecRow {
            title: "Cell",
            value: details.cell_summary(),
        });

        Self {
            item_id: vm.summary().item_id.clone(),
            category: vm.summary().category,
            name: details.name.clone(),
            main_image: asset_url(asset_prefix, vm.selected_image()),
            gallery,
            colors,
            capacities,
            price: PriceView {
                current: format!("${}", details.price_discount),
                regular: format!("${}", details.price_regular),
            },
            cart: CartButton {
                in_cart,
                label: if in_cart { "Added to cart" } else { "Add to cart" },
            },
            favorite: vm.is_favorited(favorites),
            highlights,
            tech_specs,
            about: details.description.clone(),
        }
    }
}

fn spec(title: &'static str, value: &str) -> SpecRow {
    SpecRow {
        title,
        value: value.to_owned(),
    }
}
