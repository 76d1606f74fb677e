// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared HTTP transport for provider clients
//!
//! Every provider issues a single JSON `GET` per resolution. The transport
//! merges caller options onto its defaults: the timeout bounds the whole
//! exchange, and the socket limit selects the connection pool.

use api_client::{EffectiveOptions, RequestDefaults, RequestOptions};
use reqwest::{Client, RequestBuilder, StatusCode, header::ACCEPT};
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

use crate::error::ProviderError;

const USER_AGENT: &str = concat!("isbn-resolver/", env!("CARGO_PKG_VERSION"));

/// Check that a configured base URL is an absolute HTTP(S) URL
pub(crate) fn validate_base_url(base_url: &str) -> Result<(), ProviderError> {
    let url = Url::parse(base_url)
        .map_err(|e| ProviderError::Config(format!("Invalid base URL '{base_url}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ProviderError::Config(format!(
            "Unsupported URL scheme '{scheme}' in base URL '{base_url}'"
        ))),
    }
}

/// Append an absolute path to a configured base URL
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Append `segment` to `base` as one percent-encoded path segment
pub(crate) fn with_path_segment(base: &str, segment: &str) -> Result<String, ProviderError> {
    let mut url = Url::parse(base)
        .map_err(|e| ProviderError::Config(format!("Invalid endpoint '{base}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ProviderError::Config(format!("Endpoint '{base}' cannot take a path")))?
        .push(segment);
    Ok(url.into())
}

/// HTTP transport shared by all provider clients
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    defaults: RequestDefaults,
}

impl HttpTransport {
    /// Create a transport with the given request defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(defaults: RequestDefaults) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Self::build_client(defaults.max_sockets)?,
            defaults,
        })
    }

    /// Defaults that caller options are merged onto
    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Merge caller overrides onto the transport defaults
    pub fn effective(&self, options: &RequestOptions) -> EffectiveOptions {
        options.merged_over(&self.defaults)
    }

    fn build_client(max_sockets: usize) -> Result<Client, ProviderError> {
        Client::builder()
            .pool_max_idle_per_host(max_sockets)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::Http)
    }

    /// Client honouring the socket limit in `options`
    ///
    /// Reuses the shared pool when the limit matches, otherwise builds a
    /// dedicated client for this call.
    fn client_for(&self, options: &EffectiveOptions) -> Result<Client, ProviderError> {
        if options.max_sockets == self.defaults.max_sockets {
            Ok(self.client.clone())
        } else {
            debug!(
                max_sockets = options.max_sockets,
                "building dedicated client for socket limit override"
            );
            Self::build_client(options.max_sockets)
        }
    }

    /// Issue a `GET` and decode a 200 response body as JSON
    ///
    /// # Arguments
    ///
    /// * `url` - Full request URL without query string
    /// * `query` - Query parameters, URL-encoded by the client
    /// * `headers` - Extra request headers
    /// * `options` - Caller overrides for this request
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, any status other than
    /// 200, or an undecodable body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        options: &RequestOptions,
    ) -> Result<T, ProviderError> {
        let options = self.effective(options);
        let client = self.client_for(&options)?;

        let mut request = client.get(url).header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        for &(name, value) in headers {
            request = request.header(name, value);
        }

        debug!(url, ?query, timeout_ms = options.timeout_ms(), "sending provider request");

        let Some(limit) = options.timeout else {
            return Self::exchange(request, url).await;
        };
        timeout(limit, Self::exchange(request, url))
            .await
            .map_err(|_| ProviderError::Timeout {
                millis: options.timeout_ms(),
            })?
    }

    async fn exchange<T: DeserializeOwned>(
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, ProviderError> {
        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => {
                // Decode separately so a bad body is a Json error, not Http
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!(url, status = status.as_u16(), error = message, "provider API error");
                Err(ProviderError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
