// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Common data types for book metadata and request options

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

/// Language value used when a provider does not report a recognised language
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Print type reported for every resolved record
pub const PRINT_TYPE_BOOK: &str = "BOOK";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default connection pool limit per host
pub const DEFAULT_MAX_SOCKETS: usize = 500;

/// Book metadata in the common schema shared by all providers
///
/// Serializes with camelCase keys, matching the Google Books `volumeInfo`
/// layout that the other providers are normalized to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Book title
    #[serde(default)]
    pub title: String,
    /// Publication date as reported by the provider (free text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// Authors in source order
    #[serde(default)]
    pub authors: Vec<String>,
    /// Description (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of pages (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    /// Publisher, empty when unknown
    #[serde(default)]
    pub publisher: String,
    /// Two-letter language code or [`UNKNOWN_LANGUAGE`]
    #[serde(default = "unknown_language")]
    pub language: String,
    /// Subject categories
    #[serde(default)]
    pub categories: Vec<String>,
    /// ISBN and other identifiers
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    /// Always [`PRINT_TYPE_BOOK`]
    #[serde(default = "print_type_book")]
    pub print_type: String,
    /// Cover images keyed by size name (`smallThumbnail`, `thumbnail`, ...)
    #[serde(default)]
    pub image_links: BTreeMap<String, String>,
    /// Link to a preview of the book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    /// Link to the provider's page for the book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
    /// Additional provider fields carried through unchanged
    #[serde(flatten)]
    pub additional_data: BTreeMap<String, serde_json::Value>,
}

/// Industry identifier attached to a book (ISBN-10, ISBN-13, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    /// Identifier kind, e.g. `ISBN_13`
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier value
    pub identifier: String,
}

fn unknown_language() -> String {
    UNKNOWN_LANGUAGE.to_string()
}

fn print_type_book() -> String {
    PRINT_TYPE_BOOK.to_string()
}

impl Default for Book {
    fn default() -> Self {
        Self {
            title: String::new(),
            published_date: None,
            authors: Vec::new(),
            description: None,
            page_count: None,
            publisher: String::new(),
            language: unknown_language(),
            categories: Vec::new(),
            industry_identifiers: Vec::new(),
            print_type: print_type_book(),
            image_links: BTreeMap::new(),
            preview_link: None,
            info_link: None,
            additional_data: BTreeMap::new(),
        }
    }
}

/// Caller-supplied overrides for a single resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Request timeout in milliseconds; `0` disables the timeout
    pub timeout_ms: Option<u64>,
    /// Maximum idle connections kept per host by the transport
    pub max_sockets: Option<usize>,
}

/// Built-in option values that caller overrides are merged onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDefaults {
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum idle connections kept per host
    pub max_sockets: usize,
}

/// Options after merging caller overrides onto defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveOptions {
    /// Bound on the whole request/response exchange, `None` when unbounded
    pub timeout: Option<Duration>,
    /// Maximum idle connections kept per host
    pub max_sockets: usize,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_sockets: DEFAULT_MAX_SOCKETS,
        }
    }
}

impl RequestOptions {
    /// Override the request timeout
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Override the connection pool limit
    #[must_use]
    pub fn with_max_sockets(mut self, max_sockets: usize) -> Self {
        self.max_sockets = Some(max_sockets);
        self
    }

    /// Merge these overrides onto `defaults`, field by field
    pub fn merged_over(&self, defaults: &RequestDefaults) -> EffectiveOptions {
        let timeout_ms = self.timeout_ms.unwrap_or(defaults.timeout_ms);
        EffectiveOptions {
            timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            max_sockets: self.max_sockets.unwrap_or(defaults.max_sockets),
        }
    }
}

impl EffectiveOptions {
    /// Timeout in whole milliseconds, `0` when unbounded
    pub fn timeout_ms(&self) -> u64 {
        self.timeout
            .map_or(0, |timeout| u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_defaults_fill_every_field() {
        let book = Book::default();
        assert_eq!(book.title, "");
        assert_eq!(book.publisher, "");
        assert_eq!(book.language, UNKNOWN_LANGUAGE);
        assert_eq!(book.print_type, PRINT_TYPE_BOOK);
        assert!(book.authors.is_empty());
        assert!(book.categories.is_empty());
        assert!(book.industry_identifiers.is_empty());
        assert!(book.image_links.is_empty());
    }

    #[test]
    fn book_serializes_camel_case() {
        let book = Book {
            title: "Code Complete".to_string(),
            page_count: Some(960),
            published_date: Some("2004".to_string()),
            ..Book::default()
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["title"], "Code Complete");
        assert_eq!(value["pageCount"], 960);
        assert_eq!(value["publishedDate"], "2004");
        assert_eq!(value["printType"], "BOOK");
        assert_eq!(value["industryIdentifiers"], serde_json::json!([]));
        assert!(value.get("description").is_none());
    }

    #[test]
    fn volume_info_deserializes_with_extras() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "title": "Code Complete",
            "subtitle": "A Practical Handbook",
            "authors": ["Steve McConnell"],
            "language": "en",
            "industryIdentifiers": [{"type": "ISBN_10", "identifier": "0735619670"}],
            "imageLinks": {"thumbnail": "http://books.google.com/thumb"}
        }))
        .unwrap();

        assert_eq!(book.title, "Code Complete");
        assert_eq!(book.language, "en");
        assert_eq!(book.publisher, "");
        assert_eq!(book.industry_identifiers[0].kind, "ISBN_10");
        assert_eq!(
            book.additional_data.get("subtitle"),
            Some(&serde_json::json!("A Practical Handbook"))
        );
    }

    #[test]
    fn options_merge_over_defaults() {
        let defaults = RequestDefaults::default();

        let merged = RequestOptions::default().merged_over(&defaults);
        assert_eq!(merged.timeout, Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)));
        assert_eq!(merged.max_sockets, DEFAULT_MAX_SOCKETS);

        let merged = RequestOptions::default()
            .with_timeout_ms(15_000)
            .merged_over(&defaults);
        assert_eq!(merged.timeout_ms(), 15_000);
        assert_eq!(merged.max_sockets, DEFAULT_MAX_SOCKETS);

        let merged = RequestOptions::default()
            .with_max_sockets(4)
            .merged_over(&defaults);
        assert_eq!(merged.timeout_ms(), DEFAULT_TIMEOUT_MS);
        assert_eq!(merged.max_sockets, 4);
    }

    #[test]
    fn zero_timeout_is_unbounded() {
        let merged = RequestOptions::default()
            .with_timeout_ms(0)
            .merged_over(&RequestDefaults::default());
        assert_eq!(merged.timeout, None);
        assert_eq!(merged.timeout_ms(), 0);

        let defaults = RequestDefaults {
            timeout_ms: 0,
            max_sockets: 1,
        };
        assert_eq!(RequestOptions::default().merged_over(&defaults).timeout, None);
        assert!(
            RequestOptions::default()
                .with_timeout_ms(10)
                .merged_over(&defaults)
                .timeout
                .is_some()
        );
    }
}
