//! HTTP Transport
//!
//! The single outbound primitive the relay needs: POST a JSON body and
//! report how far the response got.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::domain::response::{ReadyState, TransportResponse};
use crate::error::{Error, Result};

/// Outbound JSON POST
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Post `body` to `url` with `Content-type: application/json`.
    ///
    /// Returns `Error::Network` when no response arrives at all.
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse>;
}

/// reqwest-backed transport
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client; `timeout` of `None` leaves reqwest's default (none)
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::Invalid {
            message: format!("failed to build http client: {e}"),
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();

        // Headers arrived but the body did not finish loading
        match response.text().await {
            Ok(body) => Ok(TransportResponse::done(status, body)),
            Err(e) => {
                tracing::debug!("Response body read failed: {}", e);
                Ok(TransportResponse {
                    ready_state: ReadyState::Loading,
                    status,
                    body: String::new(),
                })
            }
        }
    }
}
