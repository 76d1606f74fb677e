// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ISBN resolver handle with provider selection
//!
//! [`IsbnResolver::providers`] sets the order used by the next resolution only;
//! once that call finishes the default order applies again. The pending order
//! lives on the handle, so two tasks interleaving `providers` and `resolve` on
//! one resolver can pick up each other's order. [`IsbnResolver::resolve_request`]
//! carries its order explicitly and never touches the pending one.

use std::sync::{Mutex, PoisonError};

use api_client::{Book, RequestOptions};
use shared_types::{ProviderId, ProviderOrder, ValidationError};
use tracing::debug;

use crate::{error::ResolveError, registry::ProviderRegistry};

/// A single resolution with its own provider order and options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// ISBN passed verbatim to every provider
    pub isbn: String,
    /// Provider order, `None` for the resolver's default
    pub providers: Option<ProviderOrder>,
    /// Per-call overrides
    pub options: RequestOptions,
}

impl ResolutionRequest {
    /// Request for `isbn` with the default order and options
    pub fn new(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            providers: None,
            options: RequestOptions::default(),
        }
    }

    /// Use `providers` instead of the default order
    #[must_use]
    pub fn with_providers(mut self, providers: ProviderOrder) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Use `options` for this request
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// Resolves ISBNs against the registered providers
#[derive(Debug)]
pub struct IsbnResolver {
    registry: ProviderRegistry,
    default_order: ProviderOrder,
    pending: Mutex<Option<ProviderOrder>>,
}

impl IsbnResolver {
    /// Create a resolver over `registry` using the built-in order
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoProviders`] if nothing is registered
    pub fn new(registry: ProviderRegistry) -> Result<Self, ResolveError> {
        let default_order = registry.default_order().ok_or(ResolveError::NoProviders)?;
        debug!(%default_order, "Resolver created");

        Ok(Self {
            registry,
            default_order,
            pending: Mutex::new(None),
        })
    }

    /// Replace the default order
    ///
    /// Providers that are not registered are dropped from `order`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoProviders`] if none of them is registered
    pub fn with_default_order(mut self, order: &ProviderOrder) -> Result<Self, ResolveError> {
        self.default_order = order
            .restricted_to(&self.registry.provider_ids())
            .ok_or(ResolveError::NoProviders)?;
        Ok(self)
    }

    /// Order used when no providers were selected
    pub fn default_order(&self) -> &ProviderOrder {
        &self.default_order
    }

    /// Order the next `resolve` call will use
    pub fn active_providers(&self) -> ProviderOrder {
        self.lock_pending()
            .clone()
            .unwrap_or_else(|| self.default_order.clone())
    }

    /// Select the providers for the next resolution
    ///
    /// An empty list keeps the current selection. Duplicates collapse to their
    /// first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownProvider`] for an unknown name; the
    /// current selection is left untouched
    pub fn providers<I, S>(&self, names: I) -> Result<&Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(order) = ProviderOrder::parse(names)? {
            self.select(order);
        }
        Ok(self)
    }

    /// Typed variant of [`IsbnResolver::providers`]
    pub fn provider_ids(&self, ids: impl IntoIterator<Item = ProviderId>) -> &Self {
        if let Some(order) = ProviderOrder::from_ids(ids) {
            self.select(order);
        }
        self
    }

    fn select(&self, order: ProviderOrder) {
        debug!(%order, "Providers selected for next resolution");
        *self.lock_pending() = Some(order);
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<ProviderOrder>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve an ISBN with default options
    ///
    /// # Errors
    ///
    /// Returns the last provider's error when every provider fails
    pub async fn resolve(&self, isbn: &str) -> Result<Book, ResolveError> {
        self.resolve_with_options(isbn, &RequestOptions::default())
            .await
    }

    /// Resolve an ISBN with per-call options
    ///
    /// Consumes the pending provider selection before the first request.
    ///
    /// # Errors
    ///
    /// Returns the last provider's error when every provider fails
    pub async fn resolve_with_options(
        &self,
        isbn: &str,
        options: &RequestOptions,
    ) -> Result<Book, ResolveError> {
        let order = self
            .lock_pending()
            .take()
            .unwrap_or_else(|| self.default_order.clone());

        self.registry.resolve_book(&order, isbn, options).await
    }

    /// Resolve with an explicit order, leaving any pending selection in place
    ///
    /// # Errors
    ///
    /// Returns the last provider's error when every provider fails
    pub async fn resolve_request(&self, request: &ResolutionRequest) -> Result<Book, ResolveError> {
        let order = request.providers.as_ref().unwrap_or(&self.default_order);
        self.registry
            .resolve_book(order, &request.isbn, &request.options)
            .await
    }

    /// Resolve and hand the outcome to `callback`
    pub async fn resolve_with_callback<F>(&self, isbn: &str, options: &RequestOptions, callback: F)
    where
        F: FnOnce(Result<Book, ResolveError>),
    {
        callback(self.resolve_with_options(isbn, options).await);
    }
}
