//! Strategy 3: schema.org JSON-LD extraction.

use scraper::Html;

use crate::locator::selectors;

/// Extract an image URL from `<script type="application/ld+json">` blocks.
///
/// Detail pages routinely embed several metadata blocks and not all of them
/// are valid JSON; unparseable blocks are skipped, never fatal.
pub(in crate::locator) fn extract_jsonld_image(doc: &Html) -> Option<String> {
    for script in doc.select(&selectors::JSON_LD) {
        let json_text: String = script.text().collect();
        let value: serde_json::Value = match serde_json::from_str(&json_text) {
            Ok(v) => v,
            Err(_) => continue,
        };
        if let Some(url) = image_field(&value) {
            return Some(url);
        }
    }
    None
}

/// The `image` field may be a plain URL string or a sequence of them; a
/// sequence yields its first element.
fn image_field(value: &serde_json::Value) -> Option<String> {
    match value.get("image")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
