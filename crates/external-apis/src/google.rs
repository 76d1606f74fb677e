// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Google Books API integration
//!
//! This module provides an implementation of the `BookProvider` trait for the
//! Google Books volumes API. Google's `volumeInfo` object already uses the
//! common [`Book`] layout, so decoding it is the whole normalization step.

use api_client::{ApiError, Book, BookProvider, RequestOptions};
use serde::Deserialize;
use shared_types::ProviderId;
use tracing::{debug, info};

use crate::{
    error::ProviderError,
    transport::{HttpTransport, endpoint, validate_base_url},
};

/// Production base URL of the Google Books API
pub const DEFAULT_GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com";

const VOLUMES_PATH: &str = "/books/v1/volumes";

/// Configuration for the Google Books client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleBooksConfig {
    /// Base URL of the API, without the volumes path
    pub base_url: String,
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GOOGLE_BOOKS_BASE_URL.to_string(),
        }
    }
}

/// Google Books volumes search response
#[derive(Debug, Deserialize)]
pub struct GoogleVolumesResponse {
    /// Number of matching volumes
    #[serde(rename = "totalItems", default)]
    pub total_items: Option<u64>,
    /// Matching volumes
    #[serde(default)]
    pub items: Option<Vec<GoogleVolume>>,
}

/// Single volume in a search response
#[derive(Debug, Deserialize)]
pub struct GoogleVolume {
    /// Bibliographic information in the common schema
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: Option<Book>,
}

/// Google Books API client implementation
#[derive(Debug)]
pub struct GoogleBooksClient {
    transport: HttpTransport,
    volumes_url: String,
}

impl GoogleBooksClient {
    /// Create a new Google Books client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute HTTP(S) URL
    pub fn new(config: GoogleBooksConfig, transport: HttpTransport) -> Result<Self, ProviderError> {
        validate_base_url(&config.base_url)?;

        Ok(Self {
            transport,
            volumes_url: endpoint(&config.base_url, VOLUMES_PATH),
        })
    }

    /// Search volumes by ISBN and return the first volume's information
    async fn lookup(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ProviderError> {
        let query = format!("isbn:{isbn}");

        let response: GoogleVolumesResponse = self
            .transport
            .get_json(&self.volumes_url, &[("q", query.as_str())], &[], options)
            .await?;

        Self::first_volume(isbn, response)
    }

    /// Apply Google's "not found" rules to a search response
    fn first_volume(isbn: &str, response: GoogleVolumesResponse) -> Result<Book, ProviderError> {
        if response.total_items.unwrap_or(0) == 0 {
            debug!(isbn, "Google Books reported zero matching volumes");
            return Err(ProviderError::NoBookFound {
                isbn: isbn.to_string(),
            });
        }

        // totalItems can be positive while items is missing or empty
        response
            .items
            .and_then(|items| items.into_iter().next())
            .and_then(|volume| volume.volume_info)
            .ok_or_else(|| ProviderError::MissingResult {
                isbn: isbn.to_string(),
            })
    }
}

impl BookProvider for GoogleBooksClient {
    async fn resolve(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ApiError> {
        info!(isbn, "Fetching book metadata from Google Books");
        self.lookup(isbn, options).await.map_err(|e| {
            debug!(isbn, error = %e, "Google Books lookup failed");
            e.into()
        })
    }

    fn id(&self) -> ProviderId {
        ProviderId::Google
    }
}

#[cfg(test)]
mod tests {
    use api_client::RequestDefaults;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    fn create_client(base_url: &str) -> GoogleBooksClient {
        let transport = HttpTransport::new(RequestDefaults::default()).unwrap();
        GoogleBooksClient::new(
            GoogleBooksConfig {
                base_url: base_url.to_string(),
            },
            transport,
        )
        .unwrap()
    }

    #[test]
    fn invalid_base_url_rejected() {
        let transport = HttpTransport::new(RequestDefaults::default()).unwrap();
        let result = GoogleBooksClient::new(
            GoogleBooksConfig {
                base_url: "googleapis".to_string(),
            },
            transport,
        );
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }

    #[test]
    fn zero_total_items_is_not_found() {
        let response: GoogleVolumesResponse =
            serde_json::from_value(json!({"kind": "books#volumes", "totalItems": 0})).unwrap();
        let result = GoogleBooksClient::first_volume("isbn", response);
        assert!(matches!(result, Err(ProviderError::NoBookFound { .. })));
    }

    #[test]
    fn missing_items_is_missing_result() {
        let response: GoogleVolumesResponse =
            serde_json::from_value(json!({"totalItems": 1, "items": []})).unwrap();
        let result = GoogleBooksClient::first_volume("isbn", response);
        assert!(matches!(result, Err(ProviderError::MissingResult { .. })));

        let response: GoogleVolumesResponse =
            serde_json::from_value(json!({"totalItems": 1})).unwrap();
        let result = GoogleBooksClient::first_volume("isbn", response);
        assert!(matches!(result, Err(ProviderError::MissingResult { .. })));
    }

    #[test]
    fn volume_info_passes_through() {
        let response: GoogleVolumesResponse = serde_json::from_value(json!({
            "totalItems": 1,
            "items": [{
                "volumeInfo": {
                    "title": "Code Complete",
                    "authors": ["Steve McConnell"],
                    "publisher": "Microsoft Press",
                    "publishedDate": "2004",
                    "pageCount": 960,
                    "language": "en",
                    "printType": "BOOK",
                    "maturityRating": "NOT_MATURE"
                }
            }]
        }))
        .unwrap();

        let book = GoogleBooksClient::first_volume("0735619670", response).unwrap();
        assert_eq!(book.title, "Code Complete");
        assert_eq!(book.authors, vec!["Steve McConnell"]);
        assert_eq!(book.publisher, "Microsoft Press");
        assert_eq!(book.page_count, Some(960));
        assert_eq!(
            book.additional_data.get("maturityRating"),
            Some(&json!("NOT_MATURE"))
        );
    }

    #[tokio::test]
    async fn resolve_sends_isbn_query() {
        let mock_server = MockServer::start().await;
        let client = create_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/books/v1/volumes"))
            .and(query_param("q", "isbn:0735619670"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalItems": 1,
                "items": [{"volumeInfo": {"title": "Code Complete"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let book = client
            .resolve("0735619670", &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(book.title, "Code Complete");
        assert_eq!(book.language, "unknown");
    }

    #[tokio::test]
    async fn resolve_http_error() {
        let mock_server = MockServer::start().await;
        let client = create_client(&mock_server.uri());

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = client.resolve("isbn", &RequestOptions::default()).await;
        assert!(matches!(result, Err(ApiError::HttpStatus { status: 503, .. })));
    }

    #[test]
    fn provider_identity() {
        let client = create_client(DEFAULT_GOOGLE_BOOKS_BASE_URL);
        assert_eq!(client.id(), ProviderId::Google);
        assert_eq!(client.name(), "google");
    }
}
