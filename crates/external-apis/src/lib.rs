// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! External API integrations for bibliographic metadata providers
//!
//! This crate provides implementations of the `BookProvider` trait for the
//! services that can resolve an ISBN, along with ordered fallback across them
//! through the registry pattern.
//!
//! # Architecture
//!
//! - **Client Implementations**: [`google`], [`open_library`], [`worldcat`], [`isbndb`]
//! - **Registry Pattern**: [`registry::ProviderRegistry`] tries clients in order until one succeeds
//! - **Resolver Handle**: [`resolver::IsbnResolver`] adds per-call provider selection
//! - **Validation Utilities**: [`non_empty_string::NonEmptyString`] for credentials
//!
//! # Example
//!
//! ```rust,no_run
//! use external_apis::{IsbnResolver, ProviderRegistry, RegistryConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ProviderRegistry::from_config(RegistryConfig::default())?;
//! let resolver = IsbnResolver::new(registry)?;
//!
//! let book = resolver.providers(["openlibrary", "google"])?.resolve("0735619670").await?;
//! println!("{}", book.title);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod google;
pub mod isbndb;
pub mod language;
pub mod non_empty_string;
pub mod open_library;
pub mod registry;
pub mod resolver;
pub mod transport;
pub mod worldcat;

pub use error::{ProviderError, ResolveError};
pub use google::{GoogleBooksClient, GoogleBooksConfig};
pub use isbndb::{IsbnDbClient, IsbnDbConfig};
pub use non_empty_string::NonEmptyString;
pub use open_library::{OpenLibraryClient, OpenLibraryConfig};
pub use registry::{ProviderRegistry, RegistryConfig};
pub use resolver::{IsbnResolver, ResolutionRequest};
pub use transport::HttpTransport;
pub use worldcat::{WorldCatClient, WorldCatConfig};
