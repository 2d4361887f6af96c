//! Affiliate and detail-page URL construction.

use crate::catalog::Marketplace;

/// Build the canonical affiliate URL for a product.
///
/// Pure and total: every `(asin, tag, marketplace)` input maps to exactly one
/// URL, and unknown marketplace codes were already folded into the default
/// storefront when the catalog was parsed.
#[must_use]
pub fn build_affiliate_url(asin: &str, tag: &str, marketplace: Marketplace) -> String {
    format!("https://www.{}/dp/{asin}/?tag={tag}", marketplace.domain())
}

/// Public product detail page, the page the image locator scrapes.
#[must_use]
pub fn detail_page_url(asin: &str, marketplace: Marketplace) -> String {
    format!("https://www.{}/dp/{asin}", marketplace.domain())
}
