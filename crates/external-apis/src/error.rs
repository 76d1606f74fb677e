// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider and resolution error types

use api_client::ApiError;
use shared_types::ProviderId;
use thiserror::Error;

/// Errors raised inside a provider client before conversion to [`ApiError`]
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider answered with a non-200 status
    #[error("wrong response code: {status}")]
    Status { status: u16, message: String },

    /// Payload signalled that no book matched
    #[error("no books found with isbn: {isbn}")]
    NoBookFound { isbn: String },

    /// Payload matched but carried no usable record
    #[error("no volume info found for book with isbn: {isbn}")]
    MissingResult { isbn: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { millis: u64 },
}

impl From<ProviderError> for ApiError {
    fn from(value: ProviderError) -> Self {
        match value {
            ProviderError::Http(error) if error.is_decode() => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            ProviderError::Http(error) => ApiError::Transport {
                message: error.to_string(),
            },
            ProviderError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            ProviderError::Status { status, message } => ApiError::HttpStatus { status, message },
            error @ (ProviderError::NoBookFound { .. } | ProviderError::MissingResult { .. }) => {
                ApiError::NotFound {
                    message: error.to_string(),
                }
            }
            ProviderError::Config(message) => ApiError::Configuration { message },
            ProviderError::Timeout { millis } => ApiError::Timeout { timeout_ms: millis },
        }
    }
}

/// Error type for resolution across providers
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every provider in the order failed; only the last failure is kept
    #[error("{provider}: {source}")]
    ProvidersExhausted {
        /// The last provider tried
        provider: ProviderId,
        /// Why it failed
        #[source]
        source: ApiError,
    },

    /// No registered provider is left to try
    #[error("No book providers registered")]
    NoProviders,
}

impl ResolveError {
    /// The provider whose failure ended the resolution, if any was tried
    pub fn last_provider(&self) -> Option<ProviderId> {
        match self {
            Self::ProvidersExhausted { provider, .. } => Some(*provider),
            Self::NoProviders => None,
        }
    }

    /// The underlying provider error, if any was tried
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::ProvidersExhausted { source, .. } => Some(source),
            Self::NoProviders => None,
        }
    }
}
