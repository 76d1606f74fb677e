// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider registry and fallback orchestration
//!
//! The registry owns one optional client per provider and resolves an ISBN by
//! trying providers strictly in order. The first success wins; otherwise the
//! last provider's error is reported and earlier ones are only logged.

use api_client::{ApiError, Book, BookProvider, RequestDefaults, RequestOptions};
use shared_types::{ProviderId, ProviderOrder};
use tracing::{debug, info, warn};

use crate::{
    GoogleBooksClient, GoogleBooksConfig, IsbnDbClient, IsbnDbConfig, OpenLibraryClient,
    OpenLibraryConfig, WorldCatClient, WorldCatConfig,
    error::{ProviderError, ResolveError},
    transport::HttpTransport,
};

/// Which providers to register and how to reach them
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Google Books, `None` to leave unregistered
    pub google: Option<GoogleBooksConfig>,
    /// Open Library, `None` to leave unregistered
    pub open_library: Option<OpenLibraryConfig>,
    /// WorldCat xISBN, `None` to leave unregistered
    pub worldcat: Option<WorldCatConfig>,
    /// ISBNdb, registered only when an API key is configured
    pub isbndb: Option<IsbnDbConfig>,
    /// Defaults that per-call options override
    pub request_defaults: RequestDefaults,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            google: Some(GoogleBooksConfig::default()),
            open_library: Some(OpenLibraryConfig::default()),
            worldcat: Some(WorldCatConfig::default()),
            isbndb: None,
            request_defaults: RequestDefaults::default(),
        }
    }
}

/// Registry of provider clients with ordered fallback
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    google: Option<GoogleBooksClient>,
    open_library: Option<OpenLibraryClient>,
    worldcat: Option<WorldCatClient>,
    isbndb: Option<IsbnDbClient>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured client on one shared transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or a provider
    /// configuration is invalid
    pub fn from_config(config: RegistryConfig) -> Result<Self, ProviderError> {
        let transport = HttpTransport::new(config.request_defaults)?;

        let google = config
            .google
            .map(|c| GoogleBooksClient::new(c, transport.clone()))
            .transpose()?;
        let open_library = config
            .open_library
            .map(|c| OpenLibraryClient::new(c, transport.clone()))
            .transpose()?;
        let worldcat = config
            .worldcat
            .map(|c| WorldCatClient::new(c, transport.clone()))
            .transpose()?;
        let isbndb = config
            .isbndb
            .map(|c| IsbnDbClient::new(c, transport))
            .transpose()?;

        let registry = Self {
            google,
            open_library,
            worldcat,
            isbndb,
        };
        info!(providers = ?registry.provider_ids(), "Provider registry initialized");
        Ok(registry)
    }

    /// Whether a client is registered for `provider`
    pub fn is_registered(&self, provider: ProviderId) -> bool {
        match provider {
            ProviderId::Google => self.google.is_some(),
            ProviderId::OpenLibrary => self.open_library.is_some(),
            ProviderId::WorldCat => self.worldcat.is_some(),
            ProviderId::IsbnDb => self.isbndb.is_some(),
        }
    }

    /// Registered providers in default priority order
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        ProviderId::all()
            .iter()
            .copied()
            .filter(|id| self.is_registered(*id))
            .collect()
    }

    /// The built-in order restricted to registered providers
    ///
    /// Returns `None` when nothing is registered.
    pub fn default_order(&self) -> Option<ProviderOrder> {
        ProviderOrder::default_order().restricted_to(&self.provider_ids())
    }

    /// Resolve an ISBN with a single provider
    ///
    /// # Errors
    ///
    /// Returns the provider's error, or [`ApiError::Configuration`] when no
    /// client is registered for `provider`
    pub async fn resolve_with_provider(
        &self,
        provider: ProviderId,
        isbn: &str,
        options: &RequestOptions,
    ) -> Result<Book, ApiError> {
        match provider {
            ProviderId::Google => match &self.google {
                Some(client) => client.resolve(isbn, options).await,
                None => Err(not_registered(provider)),
            },
            ProviderId::OpenLibrary => match &self.open_library {
                Some(client) => client.resolve(isbn, options).await,
                None => Err(not_registered(provider)),
            },
            ProviderId::WorldCat => match &self.worldcat {
                Some(client) => client.resolve(isbn, options).await,
                None => Err(not_registered(provider)),
            },
            ProviderId::IsbnDb => match &self.isbndb {
                Some(client) => client.resolve(isbn, options).await,
                None => Err(not_registered(provider)),
            },
        }
    }

    /// Resolve an ISBN by trying providers in `order`
    ///
    /// Providers are called one at a time. The first success is returned
    /// without contacting the rest.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ProvidersExhausted`] carrying the last
    /// provider's error when every provider fails
    pub async fn resolve_book(
        &self,
        order: &ProviderOrder,
        isbn: &str,
        options: &RequestOptions,
    ) -> Result<Book, ResolveError> {
        let mut last_error = None;

        for &provider in order {
            debug!(isbn, %provider, "Trying provider");
            match self.resolve_with_provider(provider, isbn, options).await {
                Ok(book) => {
                    info!(isbn, %provider, "Resolved book metadata");
                    return Ok(book);
                }
                Err(e) => {
                    warn!(isbn, %provider, error = %e, "Provider failed");
                    last_error = Some((provider, e));
                }
            }
        }

        match last_error {
            Some((provider, source)) => Err(ResolveError::ProvidersExhausted { provider, source }),
            None => Err(ResolveError::NoProviders),
        }
    }
}

fn not_registered(provider: ProviderId) -> ApiError {
    ApiError::Configuration {
        message: format!("provider '{provider}' is not registered"),
    }
}
