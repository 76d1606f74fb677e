// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ISBN resolver command line front end
//!
//! # Module Structure
//!
//! - [`args`]: Command line arguments
//! - [`config`]: Resolver configuration with hierarchical loading
//! - [`error`]: Error types for setup and output

use std::io::Write;

use external_apis::{IsbnResolver, ResolutionRequest};
use shared_types::ProviderOrder;
use tracing::{error, info};

pub mod args;
pub mod config;
pub mod error;

pub use args::Args;
pub use config::{Environment, ResolverConfig};
pub use error::{CliError, CliResult};

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// ISBNs resolved and printed
    pub resolved: usize,
    /// ISBNs no provider could resolve
    pub failed: usize,
}

impl RunSummary {
    /// Whether every ISBN was resolved
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Resolve every ISBN in `args` and write each book to `out` as JSON
///
/// Resolution failures are logged and counted; they do not stop the batch.
///
/// # Errors
///
/// Returns an error if a provider name is unknown or output cannot be written
pub async fn run<W: Write>(
    args: &Args,
    resolver: &IsbnResolver,
    out: &mut W,
) -> CliResult<RunSummary> {
    let order = ProviderOrder::parse(&args.providers)?;
    let options = args.request_options();
    let mut summary = RunSummary::default();

    for isbn in &args.isbns {
        let mut request = ResolutionRequest::new(isbn.as_str()).with_options(options);
        if let Some(order) = &order {
            request = request.with_providers(order.clone());
        }

        match resolver.resolve_request(&request).await {
            Ok(book) => {
                info!(isbn = %isbn, title = %book.title, "Resolved");
                let json = if args.compact {
                    serde_json::to_string(&book)?
                } else {
                    serde_json::to_string_pretty(&book)?
                };
                writeln!(out, "{json}")?;
                summary.resolved += 1;
            }
            Err(e) => {
                error!(isbn = %isbn, error = %e, "Failed to resolve ISBN");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
