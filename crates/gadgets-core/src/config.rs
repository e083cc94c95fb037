use crate::app_config::{AppConfig, Environment, ImageCursorInit};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap`
/// lookup instead of mutating env vars.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("GADGETS_ENV", "development"));

    let bind_addr = or_default("GADGETS_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("GADGETS_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("GADGETS_LOG_LEVEL", "info");

    let catalog_base_url = lookup("GADGETS_CATALOG_BASE_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(url) = &catalog_base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "GADGETS_CATALOG_BASE_URL",
                format!("expected an http(s) URL, got \"{url}\""),
            ));
        }
    }

    let fixtures_dir = lookup("GADGETS_FIXTURES_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let request_timeout_secs = parse_u64("GADGETS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GADGETS_USER_AGENT", "gadgets/0.1 (storefront)");

    let featured_limit = or_default("GADGETS_FEATURED_LIMIT", "10")
        .parse::<usize>()
        .map_err(|e| invalid("GADGETS_FEATURED_LIMIT", e.to_string()))?;

    let image_cursor = parse_image_cursor(&or_default("GADGETS_IMAGE_CURSOR", "details"))
        .ok_or_else(|| {
            invalid(
                "GADGETS_IMAGE_CURSOR",
                "expected \"details\" or \"summary\"".to_string(),
            )
        })?;

    let asset_prefix = or_default("GADGETS_ASSET_PREFIX", "/new/");

    let page_load_timeout_secs = match lookup("GADGETS_PAGE_LOAD_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("GADGETS_PAGE_LOAD_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_base_url,
        fixtures_dir,
        request_timeout_secs,
        user_agent,
        featured_limit,
        image_cursor,
        asset_prefix,
        page_load_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_image_cursor(s: &str) -> Option<ImageCursorInit> {
    match s.trim().to_ascii_lowercase().as_str() {
        "details" => Some(ImageCursorInit::DetailsPrimary),
        "summary" => Some(ImageCursorInit::SummaryImage),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
