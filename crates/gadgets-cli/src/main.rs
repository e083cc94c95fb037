mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gadgets_catalog::{HttpCatalog, InMemoryCatalog, ProductRepository};
use gadgets_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "gadgets-cli")]
#[command(about = "Resolve product paths and render product pages from the gadgets catalog")]
struct Cli {
    /// Read the catalog from a directory of JSON files instead of over HTTP.
    #[arg(long, global = true, value_name = "DIR")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve `/{category}/{itemId}` to its summary and details rows.
    Resolve { path: String },
    /// Print the canonical path of a sibling variant.
    Variant {
        path: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        capacity: Option<String>,
    },
    /// Load the full product page and print its rendered view.
    Page { path: String },
    /// Print the featured products.
    Featured,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = gadgets_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let fixtures = cli.fixtures.clone().or_else(|| config.fixtures_dir.clone());
    if let Some(dir) = fixtures {
        tracing::info!(dir = %dir.display(), "using fixture catalog");
        let catalog = InMemoryCatalog::load_dir(&dir, config.featured_limit)
            .with_context(|| format!("failed to load catalog fixtures from {}", dir.display()))?;
        return run(cli.command, &catalog, &config).await;
    }

    let Some(base_url) = &config.catalog_base_url else {
        anyhow::bail!("pass --fixtures or set GADGETS_CATALOG_BASE_URL to choose a catalog");
    };
    tracing::info!(%base_url, "using HTTP catalog");
    let catalog = HttpCatalog::new(
        base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.featured_limit,
    )?;
    run(cli.command, &catalog, &config).await
}

async fn run<R>(command: Commands, repo: &R, config: &AppConfig) -> anyhow::Result<()>
where
    R: ProductRepository + Clone + 'static,
{
    let output = match command {
        Commands::Resolve { path } => commands::run_resolve(repo, &path).await?,
        Commands::Variant {
            path,
            color,
            capacity,
        } => commands::run_variant(repo, &path, color, capacity).await?,
        Commands::Page { path } => commands::run_page(repo.clone(), &path, config).await?,
        Commands::Featured => commands::run_featured(repo).await?,
    };
    println!("{output}");
    Ok(())
}
