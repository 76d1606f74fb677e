// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the command line front end

use external_apis::{ProviderError, ResolveError};
use shared_types::ValidationError;
use thiserror::Error;

/// Errors raised while setting up or running the CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A provider client could not be constructed
    #[error("Provider setup failed: {0}")]
    Provider(#[from] ProviderError),

    /// The resolver could not be created
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A provider name was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A book could not be serialized
    #[error("Failed to serialize book: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
