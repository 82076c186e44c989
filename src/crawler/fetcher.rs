//! HTTP fetcher implementation
//!
//! One client, one GET per page. The client carries a fixed browser-like
//! User-Agent and a fixed timeout; there are no retries and no redirect
//! tricks. A non-success status or a transport failure both surface as the
//! network side of the error taxonomy, which the coordinator turns into
//! either "abort the run" (listing page) or "skip this ad" (ad page).

use crate::config::HttpConfig;
use crate::RadarError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for every request of a crawl run
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body as text
///
/// Fails with [`RadarError::HttpStatus`] on any non-success status and with
/// [`RadarError::Network`] on transport-level errors (timeout, connection
/// refused, body read failure).
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, RadarError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| RadarError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RadarError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| RadarError::Network {
        url: url.to_string(),
        source,
    })
}
