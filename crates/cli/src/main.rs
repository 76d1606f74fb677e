// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ISBN resolver CLI
//!
//! Looks up book metadata for ISBNs across bibliographic providers.

use anyhow::{Result, bail};
use clap::Parser;
use isbn_cli::{Args, ResolverConfig, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the JSON output
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = ResolverConfig::from_env()?;
    let resolver = config.build_resolver()?;

    let summary = run(&args, &resolver, &mut std::io::stdout().lock()).await?;

    if !summary.is_success() {
        bail!(
            "{} of {} ISBNs could not be resolved",
            summary.failed,
            summary.resolved + summary.failed
        );
    }

    Ok(())
}
