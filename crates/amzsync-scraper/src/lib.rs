pub mod client;
pub mod convert;
pub mod error;
pub mod locator;

pub use client::build_client;
pub use convert::{convert_image, fetch_and_convert};
pub use error::{ConvertError, FetchError};
pub use locator::{extract_image_url, locate_image_url, locate_image_url_at};
