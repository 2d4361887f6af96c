//! Product image locator.
//!
//! Fetches a product's public detail page and tries extraction strategies in
//! priority order (main image element, high-resolution attribute, JSON-LD
//! metadata, gallery container), returning the first match. The markup
//! varies by region and product category and changes without notice, so the
//! cascade degrades through decreasing-confidence strategies instead of
//! trusting a single selector.

mod jsonld;
mod selectors;

use scraper::Html;

use amzsync_core::{detail_page_url, Marketplace};

use crate::client::fetch_html;
use crate::error::FetchError;

/// Locate the representative image URL for a product.
///
/// # Errors
///
/// Returns [`FetchError`] if the detail page cannot be fetched. Callers
/// treat this the same as "no image found": it degrades the product's
/// outcome, it never aborts a run.
pub async fn locate_image_url(
    client: &reqwest::Client,
    asin: &str,
    marketplace: Marketplace,
) -> Result<Option<String>, FetchError> {
    let url = detail_page_url(asin, marketplace);
    locate_image_url_at(client, &url).await
}

/// Like [`locate_image_url`], against an explicit page URL.
///
/// # Errors
///
/// Returns [`FetchError`] if the page cannot be fetched.
pub async fn locate_image_url_at(
    client: &reqwest::Client,
    page_url: &str,
) -> Result<Option<String>, FetchError> {
    let html = fetch_html(client, page_url).await?;
    let found = extract_image_url(&html);
    if found.is_none() {
        tracing::warn!(page_url, "no product image found on detail page");
    }
    Ok(found)
}

/// Apply the extraction strategies in fixed priority order against a fetched
/// page, returning the first match.
#[must_use]
pub fn extract_image_url(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    // Strategy 1: the designated main image element.
    if let Some(src) = doc
        .select(&selectors::LANDING_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
    {
        tracing::debug!(src, "image found via landing image element");
        return Some(src.to_string());
    }

    // Strategy 2: the high-resolution attribute, falling back to the same
    // element's src when the attribute is present but empty.
    if let Some(img) = doc.select(&selectors::OLD_HIRES).next() {
        let hires = img.value().attr("data-old-hires").unwrap_or_default();
        let src = if hires.is_empty() {
            img.value().attr("src").unwrap_or_default()
        } else {
            hires
        };
        if !src.is_empty() {
            tracing::debug!(src, "image found via high-resolution attribute");
            return Some(src.to_string());
        }
    }

    // Strategy 3: schema.org JSON-LD metadata.
    if let Some(url) = jsonld::extract_jsonld_image(&doc) {
        tracing::debug!(url, "image found via JSON-LD metadata");
        return Some(url);
    }

    // Strategy 4: first image inside the gallery container.
    if let Some(src) = doc
        .select(&selectors::IMAGE_BLOCK_IMG)
        .next()
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
    {
        tracing::debug!(src, "image found via gallery container");
        return Some(src.to_string());
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_landing_image_src() {
        let html = r#"
            <html><body>
              <img id="landingImage" src="https://img.example.com/main.jpg">
            </body></html>
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/main.jpg")
        );
    }

    #[test]
    fn landing_image_with_empty_src_is_ignored() {
        let html = r#"
            <img id="landingImage" src="">
            <img data-old-hires="https://img.example.com/hires.jpg" src="https://img.example.com/low.jpg">
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/hires.jpg")
        );
    }

    #[test]
    fn prefers_landing_image_over_hires_attribute() {
        let html = r#"
            <img data-old-hires="https://img.example.com/hires.jpg" src="https://img.example.com/low.jpg">
            <img id="landingImage" src="https://img.example.com/main.jpg">
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/main.jpg")
        );
    }

    #[test]
    fn empty_hires_attribute_falls_back_to_src() {
        let html = r#"<img data-old-hires="" src="https://img.example.com/low.jpg">"#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/low.jpg")
        );
    }

    #[test]
    fn extracts_image_from_jsonld_string() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Product", "name": "Casque", "image": "https://img.example.com/ld.jpg"}
            </script>
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/ld.jpg")
        );
    }

    #[test]
    fn jsonld_image_array_yields_first_element() {
        let html = r#"
            <script type="application/ld+json">
            {"image": ["https://img.example.com/a.jpg", "https://img.example.com/b.jpg"]}
            </script>
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/a.jpg")
        );
    }

    #[test]
    fn malformed_jsonld_block_is_skipped() {
        let html = r#"
            <script type="application/ld+json">{not valid json</script>
            <script type="application/ld+json">
            {"image": "https://img.example.com/ok.jpg"}
            </script>
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/ok.jpg")
        );
    }

    #[test]
    fn jsonld_without_image_field_is_not_a_match() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Product", "name": "Casque"}
            </script>
            <div id="imageBlock"><img src="https://img.example.com/block.jpg"></div>
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/block.jpg")
        );
    }

    #[test]
    fn falls_back_to_image_block_container() {
        let html = r#"
            <div id="imageBlock">
              <span><img src="https://img.example.com/thumb.jpg"></span>
            </div>
        "#;
        assert_eq!(
            extract_image_url(html).as_deref(),
            Some("https://img.example.com/thumb.jpg")
        );
    }

    #[test]
    fn images_outside_the_gallery_container_do_not_match() {
        let html = r#"<div id="nav"><img src="https://img.example.com/sprite.png"></div>"#;
        assert_eq!(extract_image_url(html), None);
    }

    #[test]
    fn returns_none_when_no_strategy_matches() {
        let html = "<html><body><p>Page indisponible</p></body></html>";
        assert_eq!(extract_image_url(html), None);
    }
}
