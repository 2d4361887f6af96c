//! CSS selectors for marketplace detail-page parsing.
//!
//! Update this file when the remote markup changes; capture an HTML sample
//! and add a fixture to the locator tests when a selector stops matching.

use std::sync::LazyLock;

use scraper::Selector;

/// The designated main product image.
pub(in crate::locator) static LANDING_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img#landingImage").expect("valid selector"));

/// Image elements carrying the high-resolution source attribute.
pub(in crate::locator) static OLD_HIRES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[data-old-hires]").expect("valid selector"));

/// schema.org metadata blocks.
pub(in crate::locator) static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// Any image nested in the gallery container.
pub(in crate::locator) static IMAGE_BLOCK_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#imageBlock img").expect("valid selector"));
