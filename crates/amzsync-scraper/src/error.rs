use thiserror::Error;

/// Failure to pull a resource off the network.
///
/// Always recoverable from the orchestrator's point of view: it degrades a
/// single product's outcome, it never aborts a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// Failure while materializing a located image as a local WebP asset.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("cannot write image asset: {0}")]
    Io(#[from] std::io::Error),
}
