pub mod client;
pub mod error;
pub mod featured;
pub mod memory;
pub mod navigate;
pub mod path;
pub mod repository;
pub mod resolve;

pub use client::HttpCatalog;
pub use error::{FetchError, ResolveError};
pub use featured::select_featured;
pub use memory::InMemoryCatalog;
pub use navigate::{build_variant_path, VariantChange};
pub use path::ProductPath;
pub use repository::ProductRepository;
pub use resolve::{resolve_path, resolve_variant, ResolvedProduct};
