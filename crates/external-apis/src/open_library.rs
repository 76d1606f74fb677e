// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Open Library API integration
//!
//! This module provides an implementation of the `BookProvider` trait for the
//! Open Library books API (`jscmd=details`). Responses are keyed by the
//! requested bibkey; a missing key means no book matched.

use std::collections::{BTreeMap, HashMap};

use api_client::{ApiError, Book, BookProvider, RequestOptions};
use serde::Deserialize;
use serde_json::Value;
use shared_types::ProviderId;
use tracing::{debug, info};

use crate::{
    error::ProviderError,
    language,
    transport::{HttpTransport, endpoint, validate_base_url},
};

/// Production base URL of the Open Library API
pub const DEFAULT_OPEN_LIBRARY_BASE_URL: &str = "https://openlibrary.org";

const BOOKS_PATH: &str = "/api/books";

/// Configuration for the Open Library client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLibraryConfig {
    /// Base URL of the API, without the books path
    pub base_url: String,
}

impl Default for OpenLibraryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPEN_LIBRARY_BASE_URL.to_string(),
        }
    }
}

/// Book entry returned by Open Library for one bibkey
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenLibraryRecord {
    /// Open Library page for the edition
    pub info_url: Option<String>,
    /// Preview or borrow page
    pub preview_url: Option<String>,
    /// Cover thumbnail
    pub thumbnail_url: Option<String>,
    /// Edition details
    #[serde(default)]
    pub details: OpenLibraryDetails,
}

/// Edition details of an Open Library record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenLibraryDetails {
    /// Edition title
    pub title: Option<String>,
    /// Edition subtitle
    pub subtitle: Option<String>,
    /// Publication date as free text
    pub publish_date: Option<String>,
    /// Page count
    pub number_of_pages: Option<u32>,
    /// Publisher names
    pub publishers: Option<Vec<String>>,
    /// Author references
    pub authors: Option<Vec<OpenLibraryAuthor>>,
    /// Language references such as `/languages/eng`
    pub languages: Option<Vec<OpenLibraryLanguage>>,
}

/// Author reference in edition details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenLibraryAuthor {
    /// Display name
    pub name: Option<String>,
    /// Author key, e.g. `/authors/OL840869A`
    pub key: Option<String>,
}

/// Language reference in edition details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenLibraryLanguage {
    /// Language key, e.g. `/languages/eng`
    #[serde(default)]
    pub key: String,
}

/// Convert an Open Library record to the common book schema
pub fn normalize(record: OpenLibraryRecord) -> Book {
    let OpenLibraryRecord {
        info_url,
        preview_url,
        thumbnail_url,
        details,
    } = record;

    let mut image_links = BTreeMap::new();
    if let Some(thumbnail) = thumbnail_url {
        image_links.insert("smallThumbnail".to_string(), thumbnail.clone());
        image_links.insert("thumbnail".to_string(), thumbnail);
    }

    let authors = details
        .authors
        .unwrap_or_default()
        .into_iter()
        .filter_map(|author| author.name)
        .collect();

    // The last listed language wins
    let language = details
        .languages
        .as_deref()
        .and_then(<[OpenLibraryLanguage]>::last)
        .map_or(api_client::UNKNOWN_LANGUAGE, |l| {
            language::from_open_library_key(&l.key)
        });

    Book {
        title: details.title.unwrap_or_default(),
        published_date: details.publish_date,
        authors,
        description: details.subtitle,
        page_count: details.number_of_pages,
        publisher: details
            .publishers
            .and_then(|publishers| publishers.into_iter().next())
            .unwrap_or_default(),
        language: language.to_string(),
        image_links,
        preview_link: preview_url,
        info_link: info_url,
        ..Book::default()
    }
}

/// Open Library API client implementation
#[derive(Debug)]
pub struct OpenLibraryClient {
    transport: HttpTransport,
    books_url: String,
}

impl OpenLibraryClient {
    /// Create a new Open Library client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute HTTP(S) URL
    pub fn new(config: OpenLibraryConfig, transport: HttpTransport) -> Result<Self, ProviderError> {
        validate_base_url(&config.base_url)?;

        Ok(Self {
            transport,
            books_url: endpoint(&config.base_url, BOOKS_PATH),
        })
    }

    async fn lookup(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ProviderError> {
        let bibkey = format!("ISBN:{isbn}");

        let mut books: HashMap<String, Value> = self
            .transport
            .get_json(
                &self.books_url,
                &[
                    ("bibkeys", bibkey.as_str()),
                    ("format", "json"),
                    ("jscmd", "details"),
                ],
                &[],
                options,
            )
            .await?;

        let record = books
            .remove(&bibkey)
            .filter(|record| !record.is_null())
            .ok_or_else(|| ProviderError::NoBookFound {
                isbn: isbn.to_string(),
            })?;

        let record: OpenLibraryRecord = serde_json::from_value(record)?;
        Ok(normalize(record))
    }
}

impl BookProvider for OpenLibraryClient {
    async fn resolve(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ApiError> {
        info!(isbn, "Fetching book metadata from Open Library");
        self.lookup(isbn, options).await.map_err(|e| {
            debug!(isbn, error = %e, "Open Library lookup failed");
            e.into()
        })
    }

    fn id(&self) -> ProviderId {
        ProviderId::OpenLibrary
    }
}
