//! cellar-catalog - export the cellar as a printable wine list
//!
//! Loads every wine (from a JSON file or the cellar database), composes the
//! catalog and writes `wine-list-<date>.<ext>` to the output directory.

use anyhow::{Context, Result};
use cellar_catalog::{write_document, CatalogComposer, OutputFormat};
use cellar_common::config::{load_toml_config, RootFolderInitializer, RootFolderResolver, TomlConfig};
use cellar_common::{db, models, time, WineRecord};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MODULE_NAME: &str = "wine-list";

#[derive(Debug, Parser)]
#[command(name = "cellar-catalog", version, about = "Export the cellar as a paginated wine list")]
struct Args {
    /// Root folder holding cellar.db
    #[arg(long, env = "CELLAR_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Database file (overrides <root>/cellar.db)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Read wines from a JSON array instead of the database
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory the wine list is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Output format (defaults to [catalog].format from config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Generation date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// TOML config file (defaults to ~/.config/cellar/wine-list.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(config: &TomlConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

async fn load_from_database(path: &Path) -> Result<Vec<WineRecord>> {
    if !path.exists() {
        warn!("Database {} does not exist yet; creating an empty cellar", path.display());
    }
    let pool = db::init_database(path)
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    let wines = db::load_all_wines(&pool)
        .await
        .context("Failed to load wines from database")?;
    pool.close().await;
    Ok(wines)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = RootFolderResolver::new(MODULE_NAME);
    let toml_config = match &args.config {
        Some(path) => load_toml_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => resolver.load_toml(),
    };

    init_tracing(&toml_config)?;

    // Build identification first, before any slow I/O
    info!(
        "Starting cellar-catalog v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let catalog_config = &toml_config.catalog;
    let format = match args.format {
        Some(format) => format,
        None => catalog_config
            .format
            .parse::<OutputFormat>()
            .context("Invalid [catalog].format in config")?,
    };
    let generated_on = match &args.date {
        Some(date) => time::parse_iso_date(date).context("Invalid --date")?,
        None => time::today(),
    };
    let composer = CatalogComposer::from_config(catalog_config).context("Invalid page layout")?;

    let wines = match &args.input {
        Some(input) => {
            info!("Reading wines from {}", input.display());
            models::load_wines_json(input)
                .with_context(|| format!("Failed to read wines from {}", input.display()))?
        }
        None => {
            let db_path = match &args.database {
                Some(path) => path.clone(),
                None => {
                    let root_folder = resolver.resolve_from(args.root_folder.as_deref(), &toml_config);
                    let initializer = RootFolderInitializer::new(root_folder);
                    initializer.ensure_directory_exists()?;
                    initializer.database_path()
                }
            };
            info!("Database path: {}", db_path.display());
            load_from_database(&db_path).await?
        }
    };
    info!("Loaded {} wines", wines.len());

    let document = composer.compose(&wines, generated_on);
    let path = write_document(&document, &args.output_dir, format)
        .with_context(|| format!("Failed to write wine list to {}", args.output_dir.display()))?;

    info!("Sections: {}", document.sections.join(", "));
    info!("✓ Wrote {} ({} pages)", path.display(), document.page_count);

    Ok(())
}
