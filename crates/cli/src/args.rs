// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! CLI argument definitions using clap derive macros.

use api_client::RequestOptions;
use clap::Parser;

/// Resolve ISBNs to book metadata.
///
/// Each ISBN is looked up against the configured providers in priority order
/// and the first match is printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "isbn")]
#[command(author, version, about)]
pub struct Args {
    /// Provider to try, in order (repeatable): google, openlibrary, worldcat, isbndb
    #[arg(short, long = "provider", value_name = "NAME")]
    pub providers: Vec<String>,

    /// Per-request timeout in milliseconds (1-300000)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=300_000))]
    pub timeout_ms: Option<u64>,

    /// Idle connections kept per provider host
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_sockets: Option<u64>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// ISBNs to resolve
    #[arg(required = true, value_name = "ISBN")]
    pub isbns: Vec<String>,
}

impl Args {
    /// Per-call overrides given on the command line
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            timeout_ms: self.timeout_ms,
            max_sockets: self
                .max_sockets
                .and_then(|sockets| usize::try_from(sockets).ok()),
        }
    }
}
