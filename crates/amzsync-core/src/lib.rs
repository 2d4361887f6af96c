pub mod affiliate;
pub mod app_config;
pub mod catalog;
pub mod config;

pub use affiliate::{build_affiliate_url, detail_page_url};
pub use app_config::AppConfig;
pub use catalog::{load_catalog, CatalogError, EnrichedProduct, Marketplace, ProductEntry};
pub use config::load_app_config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
