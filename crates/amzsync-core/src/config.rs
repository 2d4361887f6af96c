use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default `User-Agent`: a current desktop Chrome signature. Detail pages
/// hide most of their markup from non-browser agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value. Every key has
/// a default, so an empty environment always succeeds.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing logic is decoupled from the actual environment so it can be
/// tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("AMZSYNC_LOG_LEVEL", "info");
    let user_agent = or_default("AMZSYNC_USER_AGENT", DEFAULT_USER_AGENT);
    let page_timeout_secs = parse_u64("AMZSYNC_PAGE_TIMEOUT_SECS", "10")?;
    let image_timeout_secs = parse_u64("AMZSYNC_IMAGE_TIMEOUT_SECS", "15")?;
    let inter_product_delay_secs = parse_u64("AMZSYNC_INTER_PRODUCT_DELAY_SECS", "2")?;

    Ok(AppConfig {
        log_level,
        user_agent,
        page_timeout_secs,
        image_timeout_secs,
        inter_product_delay_secs,
    })
}
