//! Image download and normalization.
//!
//! Every located image is re-encoded as lossy WebP at a fixed quality so the
//! asset store holds exactly one format. Transparency is composited onto an
//! opaque white background first; palette sources arrive from the decoder
//! already expanded to RGBA, so their transparency takes the same path.

use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::client::fetch_bytes;
use crate::error::ConvertError;

/// Encoding quality for every materialized asset.
const WEBP_QUALITY: f32 = 85.0;

/// Download `image_url` and materialize it at `dest` as WebP.
///
/// `dest` is derived deterministically from the product identifier by the
/// caller; its existence on a later run is the cache signal.
///
/// # Errors
///
/// Returns [`ConvertError`] on any network, decode, or filesystem failure.
/// All of them are recoverable per-product outcomes for the caller.
pub async fn fetch_and_convert(
    client: &reqwest::Client,
    image_url: &str,
    dest: &Path,
) -> Result<(), ConvertError> {
    let bytes = fetch_bytes(client, image_url).await?;
    let encoded = convert_image(&bytes)?;
    std::fs::write(dest, encoded)?;
    tracing::debug!(dest = %dest.display(), "image asset written");
    Ok(())
}

/// Decode raw image bytes, flatten transparency, and encode as WebP.
///
/// # Errors
///
/// Returns [`ConvertError::Decode`] if the bytes are not a decodable image.
pub fn convert_image(bytes: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = flatten_onto_white(&decoded);
    let (width, height) = rgb.dimensions();
    let encoded = webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode(WEBP_QUALITY);
    Ok(encoded.to_vec())
}

/// Composite transparent pixels onto a white background of identical
/// dimensions; images without an alpha channel pass through unchanged.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // blended channel is <= 255 by construction
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flattened = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u32::from(a);
        let blend = |c: u8| -> u8 {
            // c*a + 255*(255-a), rounded back into one channel.
            ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        flattened.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }
    flattened
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, Rgba, RgbaImage};

    use super::*;

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .expect("png encode");
        buf
    }

    #[test]
    fn opaque_image_passes_through_unchanged() {
        let rgb = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let img = DynamicImage::ImageRgb8(rgb.clone());
        assert_eq!(flatten_onto_white(&img), rgb);
    }

    #[test]
    fn fully_transparent_pixels_become_white() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([200, 10, 10, 0]));
        let flattened = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(flattened.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn fully_opaque_alpha_keeps_the_source_color() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([200, 10, 10, 255]));
        let flattened = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(flattened.get_pixel(1, 1), &Rgb([200, 10, 10]));
    }

    #[test]
    fn half_transparent_red_blends_toward_white() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));
        let flattened = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));
        // 0*128/255 + 255*127/255 rounds to 127 on the green/blue channels.
        assert_eq!(flattened.get_pixel(0, 0), &Rgb([255, 127, 127]));
    }

    #[test]
    fn converted_output_is_webp_without_alpha() {
        // Left half opaque blue, right half fully transparent.
        let mut rgba = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 200, 255]));
        for y in 0..32 {
            for x in 16..32 {
                rgba.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
        let source = png_bytes(&DynamicImage::ImageRgba8(rgba));

        let encoded = convert_image(&source).expect("conversion succeeds");
        assert_eq!(
            image::guess_format(&encoded).expect("recognizable format"),
            ImageFormat::WebP
        );

        let decoded = image::load_from_memory(&encoded).expect("webp decodes");
        assert!(
            !decoded.color().has_alpha(),
            "normalized output must not carry an alpha channel"
        );

        // The transparent half must read back as (near-)white, sampled away
        // from the color edge; lossy encoding allows a small tolerance.
        let rgb = decoded.to_rgb8();
        let pixel = rgb.get_pixel(29, 16);
        assert!(
            pixel.0.iter().all(|&c| c > 235),
            "transparent region should be white, got {pixel:?}"
        );
    }

    #[test]
    fn undecodable_bytes_are_a_decode_error() {
        let result = convert_image(b"<html>not an image</html>");
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }
}
