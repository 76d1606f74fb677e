// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ISBNdb API integration
//!
//! ISBNdb is a commercial database and requires an API key, sent verbatim in
//! the `Authorization` header.

use std::collections::BTreeMap;

use api_client::{ApiError, Book, BookProvider, RequestOptions};
use serde::Deserialize;
use shared_types::ProviderId;
use tracing::{debug, info};

use crate::{
    error::ProviderError,
    non_empty_string::NonEmptyString,
    transport::{HttpTransport, endpoint, validate_base_url, with_path_segment},
};

/// Production base URL of the ISBNdb API
pub const DEFAULT_ISBNDB_BASE_URL: &str = "https://api2.isbndb.com";

const BOOK_PATH: &str = "/book";

/// Configuration for the ISBNdb client
#[derive(Debug, Clone)]
pub struct IsbnDbConfig {
    /// Base URL of the API
    pub base_url: String,
    /// API key sent as the `Authorization` header
    pub api_key: NonEmptyString,
}

impl IsbnDbConfig {
    /// Configuration for the production API with the given key
    pub fn new(api_key: NonEmptyString) -> Self {
        Self {
            base_url: DEFAULT_ISBNDB_BASE_URL.to_string(),
            api_key,
        }
    }
}

/// `/book/{isbn}` response envelope
#[derive(Debug, Deserialize)]
pub struct IsbnDbResponse {
    /// Matching book, absent when nothing matched
    pub book: Option<IsbnDbRecord>,
}

/// Book record as returned by ISBNdb
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IsbnDbRecord {
    /// Short title
    pub title: Option<String>,
    /// Title including subtitle
    pub title_long: Option<String>,
    /// Publisher
    pub publisher: Option<String>,
    /// Publication date as free text
    pub date_published: Option<String>,
    /// Page count
    pub pages: Option<u32>,
    /// Authors in source order
    #[serde(default)]
    pub authors: Vec<String>,
    /// Cover image URL
    pub image: Option<String>,
}

/// Convert an ISBNdb record to the common book schema
pub fn normalize(record: IsbnDbRecord) -> Book {
    let mut image_links = BTreeMap::new();
    if let Some(image) = record.image {
        image_links.insert("thumbnail".to_string(), image);
    }

    Book {
        title: record.title_long.or(record.title).unwrap_or_default(),
        published_date: record.date_published,
        authors: record.authors,
        page_count: record.pages,
        publisher: record.publisher.unwrap_or_default(),
        image_links,
        ..Book::default()
    }
}

/// ISBNdb API client implementation
#[derive(Debug)]
pub struct IsbnDbClient {
    transport: HttpTransport,
    book_url: String,
    api_key: NonEmptyString,
}

impl IsbnDbClient {
    /// Create a new ISBNdb client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute HTTP(S) URL
    pub fn new(config: IsbnDbConfig, transport: HttpTransport) -> Result<Self, ProviderError> {
        validate_base_url(&config.base_url)?;

        Ok(Self {
            transport,
            book_url: endpoint(&config.base_url, BOOK_PATH),
            api_key: config.api_key,
        })
    }

    async fn lookup(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ProviderError> {
        let url = with_path_segment(&self.book_url, isbn)?;

        let response: IsbnDbResponse = self
            .transport
            .get_json(
                &url,
                &[],
                &[("Authorization", self.api_key.as_str())],
                options,
            )
            .await?;

        response
            .book
            .map(normalize)
            .ok_or_else(|| ProviderError::NoBookFound {
                isbn: isbn.to_string(),
            })
    }
}

impl BookProvider for IsbnDbClient {
    async fn resolve(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ApiError> {
        info!(isbn, "Fetching book metadata from ISBNdb");
        self.lookup(isbn, options).await.map_err(|e| {
            debug!(isbn, error = %e, "ISBNdb lookup failed");
            e.into()
        })
    }

    fn id(&self) -> ProviderId {
        ProviderId::IsbnDb
    }
}
