//! The reqwest-backed [`ImageSource`] used by real runs.

use std::path::Path;

use amzsync_core::{AppConfig, ProductEntry};
use amzsync_scraper::{build_client, ConvertError, FetchError};

use super::ImageSource;

/// Live implementation: one client per timeout profile. Detail pages are
/// quick HTML; image payloads are larger and get a longer budget.
pub(crate) struct ScraperSource {
    page_client: reqwest::Client,
    image_client: reqwest::Client,
}

impl ScraperSource {
    pub(crate) fn new(config: &AppConfig) -> Result<Self, FetchError> {
        Ok(Self {
            page_client: build_client(config.page_timeout_secs, &config.user_agent)?,
            image_client: build_client(config.image_timeout_secs, &config.user_agent)?,
        })
    }
}

impl ImageSource for ScraperSource {
    async fn locate(&self, entry: &ProductEntry) -> Result<Option<String>, FetchError> {
        amzsync_scraper::locate_image_url(
            &self.page_client,
            &entry.asin,
            entry.marketplace_or_default(),
        )
        .await
    }

    async fn fetch_and_convert(
        &self,
        image_url: &str,
        dest: &Path,
    ) -> Result<(), ConvertError> {
        amzsync_scraper::fetch_and_convert(&self.image_client, image_url, dest).await
    }
}
