//! The enrichment run.
//!
//! Drives each catalog entry through locate -> fetch -> convert, one product
//! at a time, with idempotent caching against the asset store and a
//! placeholder fallback when no real image can be obtained. Per-product
//! failures are logged and degraded, never propagated: a single unreachable
//! detail page must not stop the rest of the catalog.

mod source;

use std::path::{Path, PathBuf};

use amzsync_core::{build_affiliate_url, AppConfig, EnrichedProduct, ProductEntry};
use amzsync_scraper::{ConvertError, FetchError};

pub(crate) use source::ScraperSource;

/// Web path substituted whenever no real product image is available,
/// regardless of which step failed.
pub(crate) const PLACEHOLDER_IMAGE: &str = "/assets/img/product-placeholder.webp";

/// Terminal outcome for one product. Keeps the orchestrator's branching
/// exhaustive; both the record's `local_image` and the run statistics derive
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyncOutcome {
    /// Asset already materialized; locate and fetch skipped entirely.
    Cached,
    /// Image located and converted this run.
    Converted,
    /// Image located but the download or conversion failed.
    ConvertFailed,
    /// No image URL could be resolved from the detail page.
    NotLocated,
}

/// Aggregate counters for one run, owned by the orchestrator and read-only
/// once the run completes. `failed > 0` drives a non-zero process exit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SyncStats {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncStats {
    fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Cached => self.skipped += 1,
            SyncOutcome::Converted => self.success += 1,
            SyncOutcome::ConvertFailed | SyncOutcome::NotLocated => self.failed += 1,
        }
    }
}

/// The two remote operations the orchestrator needs, as a seam so tests can
/// drive the per-product state machine without a network.
pub(crate) trait ImageSource {
    async fn locate(&self, entry: &ProductEntry) -> Result<Option<String>, FetchError>;

    async fn fetch_and_convert(&self, image_url: &str, dest: &Path)
        -> Result<(), ConvertError>;
}

/// Filesystem layout for one run.
pub(crate) struct SyncPaths {
    /// Directory real assets are written into; file existence per ASIN is
    /// the cache signal.
    pub products_dir: PathBuf,
    /// Enriched catalog destination, next to the source catalog.
    pub enriched_file: PathBuf,
}

impl SyncPaths {
    pub(crate) fn new(data_file: &Path, output_dir: &Path) -> Self {
        let stem = data_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("catalog");
        Self {
            products_dir: output_dir.join("products"),
            enriched_file: data_file.with_file_name(format!("{stem}.enriched.json")),
        }
    }

    fn asset_path(&self, asin: &str) -> PathBuf {
        self.products_dir.join(format!("{asin}.webp"))
    }
}

/// Web path recorded in the enriched catalog for a materialized asset. Fixed
/// relative to the site root, independent of where the asset directory lives
/// on disk.
fn web_image_path(asin: &str) -> String {
    format!("/assets/img/products/{asin}.webp")
}

/// Run the enrichment pipeline over `products`, strictly in catalog order.
///
/// A fixed pause separates consecutive products; the remote site is someone
/// else's production traffic.
pub(crate) async fn run_sync<S: ImageSource>(
    source: &S,
    paths: &SyncPaths,
    products: &[ProductEntry],
    force: bool,
    delay_secs: u64,
) -> (Vec<EnrichedProduct>, SyncStats) {
    let mut stats = SyncStats {
        total: products.len(),
        ..SyncStats::default()
    };
    let mut enriched = Vec::with_capacity(products.len());

    for (i, entry) in products.iter().enumerate() {
        tracing::info!(
            position = i + 1,
            total = stats.total,
            asin = %entry.asin,
            title = entry.display_title(),
            "processing product"
        );

        let (record, outcome) = process_product(source, paths, entry, force).await;
        stats.record(outcome);
        enriched.push(record);

        if i + 1 < products.len() {
            tokio::time::sleep(std::time::Duration::from_secs(delay_secs)).await;
        }
    }

    (enriched, stats)
}

/// Resolve one product to an enriched record and its terminal outcome.
///
/// The affiliate URL is attached in every case; it is independent of the
/// image outcome and never fails.
async fn process_product<S: ImageSource>(
    source: &S,
    paths: &SyncPaths,
    entry: &ProductEntry,
    force: bool,
) -> (EnrichedProduct, SyncOutcome) {
    let affiliate_url =
        build_affiliate_url(&entry.asin, &entry.tag, entry.marketplace_or_default());

    let outcome = resolve_image(source, paths, entry, force).await;
    let local_image = match outcome {
        SyncOutcome::Cached | SyncOutcome::Converted => web_image_path(&entry.asin),
        SyncOutcome::ConvertFailed | SyncOutcome::NotLocated => PLACEHOLDER_IMAGE.to_string(),
    };

    (
        EnrichedProduct {
            product: entry.clone(),
            affiliate_url,
            local_image,
        },
        outcome,
    )
}

/// The per-product state machine: cache check, then locate, then
/// fetch-and-convert, each step degrading to the next outcome on failure.
async fn resolve_image<S: ImageSource>(
    source: &S,
    paths: &SyncPaths,
    entry: &ProductEntry,
    force: bool,
) -> SyncOutcome {
    let asset_path = paths.asset_path(&entry.asin);

    if !force && asset_path.exists() {
        tracing::info!(asin = %entry.asin, "asset already materialized, skipping fetch");
        return SyncOutcome::Cached;
    }

    let image_url = match source.locate(entry).await {
        Ok(Some(url)) => url,
        Ok(None) => {
            tracing::warn!(asin = %entry.asin, "no image located, using placeholder");
            return SyncOutcome::NotLocated;
        }
        Err(e) => {
            tracing::warn!(asin = %entry.asin, error = %e, "detail page fetch failed, using placeholder");
            return SyncOutcome::NotLocated;
        }
    };

    match source.fetch_and_convert(&image_url, &asset_path).await {
        Ok(()) => SyncOutcome::Converted,
        Err(e) => {
            tracing::warn!(asin = %entry.asin, error = %e, "image conversion failed, using placeholder");
            SyncOutcome::ConvertFailed
        }
    }
}

/// Persist the enriched catalog, pretty-printed.
///
/// A failure here is logged, not propagated: assets already on disk stay
/// valid and the run still reports its statistics and exit status.
pub(crate) fn write_enriched(path: &Path, records: &[EnrichedProduct]) {
    let payload = match serde_json::to_string_pretty(records) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "cannot serialize enriched catalog");
            return;
        }
    };

    if let Err(e) = std::fs::write(path, payload) {
        tracing::error!(path = %path.display(), error = %e, "cannot write enriched catalog");
    } else {
        tracing::info!(path = %path.display(), count = records.len(), "enriched catalog written");
    }
}

/// Handler for `amzsync sync`, called from `main` once config and logging
/// are established.
///
/// # Errors
///
/// Returns an error only for fatal conditions: an unreadable or malformed
/// catalog, an asset directory that cannot be created, or an HTTP client
/// that cannot be constructed. Per-product failures end up in the returned
/// statistics instead.
pub(crate) async fn run_sync_command(
    config: &AppConfig,
    data_file: &Path,
    output_dir: &Path,
    force: bool,
) -> anyhow::Result<SyncStats> {
    let paths = SyncPaths::new(data_file, output_dir);
    std::fs::create_dir_all(&paths.products_dir)?;

    let products = amzsync_core::load_catalog(data_file)?;
    println!(
        "loaded {} products from {}",
        products.len(),
        data_file.display()
    );

    let source = ScraperSource::new(config)?;
    let (enriched, stats) = run_sync(
        &source,
        &paths,
        &products,
        force,
        config.inter_product_delay_secs,
    )
    .await;

    write_enriched(&paths.enriched_file, &enriched);

    println!(
        "synced {} products: {} fetched, {} already cached, {} failed",
        stats.total, stats.success, stats.skipped, stats.failed
    );
    if stats.failed > 0 {
        println!("failed products fall back to the placeholder image");
    }

    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
