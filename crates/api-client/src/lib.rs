// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic book provider traits and types for external integrations
//!
//! This crate provides common abstractions for bibliographic API clients that
//! resolve book metadata from an ISBN.
//!
//! # Core Abstractions
//!
//! - **`BookProvider` Trait**: Common interface for all provider clients with async support
//! - **Error Handling**: `ApiError` classifies every way a single provider can fail
//! - **Data Types**: The common [`Book`] record and per-call [`RequestOptions`]
//!
//! # Key Features
//!
//! - **Async-First Design**: Operations return `impl Future` for efficient async execution
//! - **Recoverable Failures**: Every `ApiError` is local to one provider, so callers can
//!   fall back to the next one
//! - **Shape Compatibility**: Every provider produces a fully populated [`Book`]

use shared_types::ProviderId;
use thiserror::Error;

pub mod types;

pub use types::*;

/// Generic trait for bibliographic metadata providers
///
/// Implementations issue one outbound request per call, detect the provider's
/// "not found" signal, and normalize the located record into a [`Book`].
pub trait BookProvider: Send + Sync {
    /// Resolve book metadata for an ISBN
    ///
    /// The ISBN is passed through to the provider verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out, the provider answers
    /// with a non-200 status, the payload signals that no book matched, or the
    /// payload cannot be decoded
    fn resolve(
        &self,
        isbn: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Book, ApiError>> + Send;

    /// Get the identifier of this provider
    fn id(&self) -> ProviderId;

    /// Get the name of this provider
    fn name(&self) -> &'static str {
        self.id().name()
    }
}

/// Errors a single provider can return
///
/// All of these are recoverable at the orchestration level.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Connection, DNS or protocol failure
    #[error("HTTP request failed: {message}")]
    Transport { message: String },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Provider answered with a non-200 status
    #[error("wrong response code: {status}")]
    HttpStatus { status: u16, message: String },

    /// Well-formed response without a matching book
    #[error("{message}")]
    NotFound { message: String },

    /// Response body could not be decoded
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Provider is not usable as configured
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApiError {
    /// Whether the provider answered but had no matching book
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the request never produced a response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}
