//! HTTP plumbing shared by the image locator and the image converter.

use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

pub(crate) const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub(crate) const ACCEPT_LANGUAGE: &str = "fr-FR,fr;q=0.9,en-US;q=0.8,en;q=0.7";

/// Build an HTTP client with the given overall timeout and `User-Agent`.
///
/// Detail pages and image downloads use different timeout budgets, so the
/// caller builds one client per profile.
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the underlying `reqwest::Client` cannot
/// be constructed (e.g., invalid TLS config).
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Fetch a page body with browser-like request headers.
///
/// Exactly one attempt, no retry: a failed product degrades to the
/// placeholder downstream, and the run keeps its fixed request cadence.
pub(crate) async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, ACCEPT_HTML)
        .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.text().await?)
}

/// Fetch a binary resource body. Same single-attempt contract as
/// [`fetch_html`].
pub(crate) async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.bytes().await?.to_vec())
}
