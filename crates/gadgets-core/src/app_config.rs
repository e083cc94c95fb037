use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the detail page's image cursor starts after a variant resolves.
///
/// `SummaryImage` keeps the legacy storefront behaviour of showing the
/// summary row's single image first, even when it is not part of the
/// variant's gallery. `DetailsPrimary` starts on the gallery's first image
/// and only falls back to the summary image for an empty gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageCursorInit {
    SummaryImage,
    #[default]
    DetailsPrimary,
}

impl std::fmt::Display for ImageCursorInit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageCursorInit::SummaryImage => write!(f, "summary"),
            ImageCursorInit::DetailsPrimary => write!(f, "details"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Root URL serving `products.json`, `phones.json`, `tablets.json` and
    /// `accessories.json`.
    pub catalog_base_url: Option<String>,
    /// Directory holding the same four JSON files, used instead of HTTP when set.
    pub fixtures_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub featured_limit: usize,
    pub image_cursor: ImageCursorInit,
    pub asset_prefix: String,
    /// Upper bound on how long the server waits for a page to settle.
    /// `None` waits indefinitely.
    pub page_load_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("catalog_base_url", &self.catalog_base_url)
            .field("fixtures_dir", &self.fixtures_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("featured_limit", &self.featured_limit)
            .field("image_cursor", &self.image_cursor.to_string())
            .field("asset_prefix", &self.asset_prefix)
            .field("page_load_timeout_secs", &self.page_load_timeout_secs)
            .finish()
    }
}
