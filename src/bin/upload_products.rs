//! Bulk-loads a CSV product catalog into the search index.
//!
//! Credentials come from the environment (`ALGOLIA_APP_ID`, `ALGOLIA_ADMIN_KEY`,
//! `ALGOLIA_INDEX_NAME`), optionally via a `.env` file.

use clap::Parser;
use product_search::config::LoaderConfig;
use product_search::ingestion::loader::{load_catalog, DEFAULT_BATCH_SIZE};
use product_search::search::index::AlgoliaIndex;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "upload-products",
    about = "Upload a CSV product catalog to the search index in batches"
)]
struct Args {
    /// CSV file to load
    #[arg(long, default_value = "amz_uk_processed_data.csv")]
    file: PathBuf,

    /// Products per upload request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Target index (overrides ALGOLIA_INDEX_NAME)
    #[arg(long)]
    index: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = LoaderConfig::from_env(args.index)?;

    let index = AlgoliaIndex::new(
        config.algolia_app_id,
        config.algolia_admin_key,
        config.algolia_index_name,
    );
    tracing::info!(
        "Uploading {} to index {} in batches of {}",
        args.file.display(),
        index.index_name(),
        args.batch_size
    );

    let report = load_catalog(&args.file, &index, args.batch_size).await?;

    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} batches failed ({} products not uploaded)",
            report.batches_failed,
            report.batches_failed + report.batches_uploaded,
            report.products_failed
        );
    }

    tracing::info!(
        "All uploads complete: {} products",
        report.products_uploaded
    );
    Ok(())
}
