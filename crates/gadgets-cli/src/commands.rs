//! Command handlers. Each returns the JSON it would print so tests can
//! inspect it without capturing stdout.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;

use gadgets_catalog::{resolve_path, ProductRepository, ResolveError, VariantChange};
use gadgets_core::AppConfig;
use gadgets_storefront::{InMemoryCart, InMemoryFavorites, PageController, PageSettings};

#[derive(Debug, Serialize)]
struct VariantOutput<'a> {
    from: &'a str,
    path: String,
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

fn resolution_failed(path: &str, err: ResolveError) -> anyhow::Error {
    let message = format!("{} [{}] for {path}", err.user_message(), err.code());
    anyhow::Error::new(err).context(message)
}

pub(crate) async fn run_resolve<R: ProductRepository>(repo: &R, path: &str) -> anyhow::Result<String> {
    let resolved = resolve_path(repo, path)
        .await
        .map_err(|e| resolution_failed(path, e))?;
    to_json(&resolved)
}

pub(crate) async fn run_variant<R: ProductRepository>(
    repo: &R,
    path: &str,
    color: Option<String>,
    capacity: Option<String>,
) -> anyhow::Result<String> {
    if color.is_none() && capacity.is_none() {
        anyhow::bail!("pass --color and/or --capacity to pick a sibling variant");
    }

    let resolved = resolve_path(repo, path)
        .await
        .map_err(|e| resolution_failed(path, e))?;
    let target = resolved.sibling_path(&VariantChange { color, capacity });
    to_json(&VariantOutput {
        from: path,
        path: target,
    })
}

/// Loads the page the way the storefront does and prints its view. An
/// errored page is printed, not returned as an error.
pub(crate) async fn run_page<R: ProductRepository + 'static>(
    repo: R,
    path: &str,
    config: &AppConfig,
) -> anyhow::Result<String> {
    let mut page = PageController::new(Arc::new(repo), PageSettings::from_config(config));
    page.navigate(path);

    match config.page_load_timeout_secs {
        Some(secs) => {
            tokio::time::timeout(Duration::from_secs(secs), page.settle())
                .await
                .with_context(|| format!("page {path} did not load within {secs}s"))?;
        }
        None => {
            page.settle().await;
        }
    }

    to_json(&page.view(&InMemoryCart::new(), &InMemoryFavorites::new()))
}

pub(crate) async fn run_featured<R: ProductRepository>(repo: &R) -> anyhow::Result<String> {
    let products = repo
        .fetch_featured()
        .await
        .context("Could not fetch shuffled products")?;
    to_json(&products)
}
