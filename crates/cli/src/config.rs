// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Resolver configuration module
//!
//! This module loads provider endpoints, credentials and request defaults for
//! the CLI, supporting per-environment files and validation of each value.

use std::{fmt, num::NonZeroUsize};

use anyhow::{Result, ensure};
use api_client::{DEFAULT_MAX_SOCKETS, DEFAULT_TIMEOUT_MS, RequestDefaults};
use config::{
    Config, ConfigBuilder, ConfigError, Environment as ConfigEnv, File, builder::DefaultState,
};
use external_apis::{
    GoogleBooksConfig, IsbnDbConfig, IsbnResolver, NonEmptyString, OpenLibraryConfig,
    ProviderRegistry, RegistryConfig, WorldCatConfig, google::DEFAULT_GOOGLE_BOOKS_BASE_URL,
    isbndb::DEFAULT_ISBNDB_BASE_URL, open_library::DEFAULT_OPEN_LIBRARY_BASE_URL,
    worldcat::DEFAULT_WORLDCAT_BASE_URL,
};
use serde::{Deserialize, Deserializer, Serialize, de};
use shared_types::ProviderOrder;
use tracing::info;

use crate::error::{CliError, CliResult};

const MAX_TIMEOUT_MS: u64 = 300_000;

/// A validated request timeout in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutMillis(u64);

impl TimeoutMillis {
    /// Create a new `TimeoutMillis`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300000 milliseconds
    pub fn new(millis: u64) -> Result<Self> {
        ensure!(millis != 0, "timeout must be greater than 0");
        ensure!(
            millis <= MAX_TIMEOUT_MS,
            "timeout cannot exceed {MAX_TIMEOUT_MS}"
        );
        Ok(Self(millis))
    }

    /// Get the timeout in milliseconds
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeoutMillis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Self::new(millis).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for TimeoutMillis {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_MS)
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Development environment
    Development,
    /// Testing environment
    Testing,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

/// Provider endpoints, credentials and request defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Google Books base URL
    pub google_base_url: String,
    /// Open Library base URL
    pub open_library_base_url: String,
    /// WorldCat xISBN base URL
    pub worldcat_base_url: String,
    /// ISBNdb base URL
    pub isbndb_base_url: String,
    /// ISBNdb API key; ISBNdb is skipped without one
    #[serde(default)]
    pub isbndb_api_key: Option<NonEmptyString>,
    /// Request timeout in milliseconds (validated range: 1-300000)
    pub timeout_ms: TimeoutMillis,
    /// Idle connections kept per provider host
    pub max_sockets: NonZeroUsize,
    /// Default provider order by name; empty or absent means the built-in order
    #[serde(default)]
    pub providers: Vec<String>,
    /// Environment type
    pub environment: Environment,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            google_base_url: DEFAULT_GOOGLE_BOOKS_BASE_URL.to_string(),
            open_library_base_url: DEFAULT_OPEN_LIBRARY_BASE_URL.to_string(),
            worldcat_base_url: DEFAULT_WORLDCAT_BASE_URL.to_string(),
            isbndb_base_url: DEFAULT_ISBNDB_BASE_URL.to_string(),
            isbndb_api_key: None,
            timeout_ms: TimeoutMillis::default(),
            max_sockets: NonZeroUsize::new(DEFAULT_MAX_SOCKETS).unwrap_or(NonZeroUsize::MIN),
            providers: Vec::new(),
            environment: Environment::Development,
        }
    }
}

impl ResolverConfig {
    /// Create configuration from environment variables and optional configuration files
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> CliResult<Self> {
        Self::load().map_err(|e| CliError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. Configuration file (config.json)
    /// 3. Environment-specific files (config.{env}.json)
    /// 4. Environment variables with ISBN_ prefix
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env_var = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut config_builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config.json").required(false))
            .add_source(
                File::with_name(&format!("config.{}.json", env_var.to_lowercase())).required(false),
            )
            // ISBN_TIMEOUT_MS, ISBN_ISBNDB_API_KEY, ISBN_PROVIDERS=worldcat,google, ...
            .add_source(
                ConfigEnv::with_prefix("ISBN")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("providers"),
            );

        if std::env::var("ENVIRONMENT").is_ok() {
            config_builder = config_builder.set_override("environment", env_var.to_lowercase())?;
        }

        Self::from_builder(config_builder)
    }

    /// Register the built-in default values on `builder`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a default cannot be set
    pub fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("google_base_url", DEFAULT_GOOGLE_BOOKS_BASE_URL)?
            .set_default("open_library_base_url", DEFAULT_OPEN_LIBRARY_BASE_URL)?
            .set_default("worldcat_base_url", DEFAULT_WORLDCAT_BASE_URL)?
            .set_default("isbndb_base_url", DEFAULT_ISBNDB_BASE_URL)?
            .set_default("timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("max_sockets", u64::try_from(DEFAULT_MAX_SOCKETS).unwrap_or(u64::MAX))?
            .set_default("environment", "development")
    }

    /// Build and validate configuration from a prepared builder
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value is invalid
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;

        // Reject unknown provider names at load time rather than on first use
        config
            .default_order()
            .map_err(|e| ConfigError::Message(format!("invalid providers: {e}")))?;

        Ok(config)
    }

    /// Create configuration optimized for testing against a single mock server
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            google_base_url: base_url.to_string(),
            open_library_base_url: base_url.to_string(),
            worldcat_base_url: base_url.to_string(),
            isbndb_base_url: base_url.to_string(),
            timeout_ms: TimeoutMillis(1000),
            environment: Environment::Testing,
            ..Self::default()
        }
    }

    /// Request defaults that per-call options override
    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults {
            timeout_ms: self.timeout_ms.value(),
            max_sockets: self.max_sockets.get(),
        }
    }

    /// Configured default order, `None` for the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if a name is not a known provider
    pub fn default_order(&self) -> CliResult<Option<ProviderOrder>> {
        Ok(ProviderOrder::parse(&self.providers)?)
    }

    /// Provider registry configuration; ISBNdb is included only with a key
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            google: Some(GoogleBooksConfig {
                base_url: self.google_base_url.clone(),
            }),
            open_library: Some(OpenLibraryConfig {
                base_url: self.open_library_base_url.clone(),
            }),
            worldcat: Some(WorldCatConfig {
                base_url: self.worldcat_base_url.clone(),
            }),
            isbndb: self.isbndb_api_key.clone().map(|api_key| IsbnDbConfig {
                base_url: self.isbndb_base_url.clone(),
                api_key,
            }),
            request_defaults: self.request_defaults(),
        }
    }

    /// Build a resolver for this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a provider cannot be constructed or the configured
    /// order names no registered provider
    pub fn build_resolver(&self) -> CliResult<IsbnResolver> {
        let registry = ProviderRegistry::from_config(self.registry_config())?;
        let mut resolver = IsbnResolver::new(registry)?;

        if let Some(order) = self.default_order()? {
            resolver = resolver.with_default_order(&order)?;
        }

        info!(
            environment = %self.environment,
            providers = %resolver.default_order(),
            timeout_ms = self.timeout_ms.value(),
            "Resolver configured"
        );
        Ok(resolver)
    }
}
