//! HTTP client construction and the shared GET-and-decode path
//!
//! Both endpoints go through [`get_json`], so status handling and payload
//! decoding behave identically for listing pages and detail records.

use crate::config::SourceConfig;
use crate::{RemoteError, RemoteResult};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Builds an HTTP client with proper configuration
///
/// No request timeout is set: a stalled call stalls only the task awaiting it.
///
/// # Example
///
/// ```no_run
/// use dex_harvest::config::SourceConfig;
/// use dex_harvest::fetch::build_http_client;
///
/// let client = build_http_client(&SourceConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SourceConfig) -> RemoteResult<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(RemoteError::Client)
}

/// Issues a GET request and decodes the JSON body into `T`
///
/// # Errors
///
/// * `RemoteError::Http` - The request could not be sent or the body read
/// * `RemoteError::Status` - The server answered with a non-success status
/// * `RemoteError::Decode` - The body is not JSON of the expected shape
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> RemoteResult<T> {
    let response = client.get(url).send().await.map_err(|source| RemoteError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|source| RemoteError::Http {
        url: url.to_string(),
        source,
    })?;

    serde_json::from_slice(&body).map_err(|source| RemoteError::Decode {
        url: url.to_string(),
        source,
    })
}
