#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Sent on every page and image request; detail pages serve a reduced
    /// markup variant to obvious non-browser agents.
    pub user_agent: String,
    pub page_timeout_secs: u64,
    pub image_timeout_secs: u64,
    /// Fixed pause between products, the politeness contract toward the
    /// remote site.
    pub inter_product_delay_secs: u64,
}
