// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! WorldCat xISBN integration

use api_client::{ApiError, Book, BookProvider, RequestOptions};
use serde::Deserialize;
use shared_types::ProviderId;
use tracing::{debug, info};

use crate::{
    error::ProviderError,
    language,
    transport::{HttpTransport, endpoint, validate_base_url, with_path_segment},
};

/// Production base URL of the xISBN service
pub const DEFAULT_WORLDCAT_BASE_URL: &str = "http://xisbn.worldcat.org";

const ISBN_PATH: &str = "/webservices/xid/isbn";

const STAT_OK: &str = "ok";

/// Configuration for the WorldCat client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldCatConfig {
    /// Base URL of the service, without the xid path
    pub base_url: String,
}

impl Default for WorldCatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WORLDCAT_BASE_URL.to_string(),
        }
    }
}

/// `getMetadata` response envelope
#[derive(Debug, Deserialize)]
pub struct WorldCatResponse {
    /// `ok` on success, an error code such as `invalidId` otherwise
    #[serde(default)]
    pub stat: String,
    /// Matching records
    #[serde(default)]
    pub list: Vec<WorldCatRecord>,
}

/// One metadata record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldCatRecord {
    /// Title
    pub title: Option<String>,
    /// Publication year
    pub year: Option<String>,
    /// Publisher
    pub publisher: Option<String>,
    /// Author statement
    pub author: Option<String>,
    /// MARC language code
    pub lang: Option<String>,
}

/// Convert a WorldCat record to the common book schema
pub fn normalize(record: WorldCatRecord) -> Book {
    let language = record
        .lang
        .as_deref()
        .map_or(api_client::UNKNOWN_LANGUAGE, language::from_marc_code);

    Book {
        title: record.title.unwrap_or_default(),
        published_date: record.year,
        authors: record.author.into_iter().collect(),
        publisher: record.publisher.unwrap_or_default(),
        language: language.to_string(),
        ..Book::default()
    }
}

/// WorldCat xISBN client implementation
#[derive(Debug)]
pub struct WorldCatClient {
    transport: HttpTransport,
    base_url: String,
}

impl WorldCatClient {
    /// Create a new WorldCat client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute HTTP(S) URL
    pub fn new(config: WorldCatConfig, transport: HttpTransport) -> Result<Self, ProviderError> {
        validate_base_url(&config.base_url)?;

        Ok(Self {
            transport,
            base_url: endpoint(&config.base_url, ISBN_PATH),
        })
    }

    async fn lookup(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ProviderError> {
        let url = with_path_segment(&self.base_url, isbn)?;

        let response: WorldCatResponse = self
            .transport
            .get_json(
                &url,
                &[("method", "getMetadata"), ("fl", "*"), ("format", "json")],
                &[],
                options,
            )
            .await?;

        Self::first_record(isbn, response).map(normalize)
    }

    fn first_record(isbn: &str, response: WorldCatResponse) -> Result<WorldCatRecord, ProviderError> {
        if response.stat != STAT_OK {
            debug!(isbn, stat = %response.stat, "xISBN reported a non-ok status");
            return Err(ProviderError::NoBookFound {
                isbn: isbn.to_string(),
            });
        }

        response
            .list
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MissingResult {
                isbn: isbn.to_string(),
            })
    }
}

impl BookProvider for WorldCatClient {
    async fn resolve(&self, isbn: &str, options: &RequestOptions) -> Result<Book, ApiError> {
        info!(isbn, "Fetching book metadata from WorldCat");
        self.lookup(isbn, options).await.map_err(|e| {
            debug!(isbn, error = %e, "WorldCat lookup failed");
            e.into()
        })
    }

    fn id(&self) -> ProviderId {
        ProviderId::WorldCat
    }
}

#[cfg(test)]
mod tests {
    use api_client::{PRINT_TYPE_BOOK, RequestDefaults, UNKNOWN_LANGUAGE};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    fn record_in(lang: Option<&str>) -> WorldCatRecord {
        WorldCatRecord {
            lang: lang.map(str::to_string),
            ..WorldCatRecord::default()
        }
    }

    #[test]
    fn normalize_full_record() {
        let record: WorldCatRecord = serde_json::from_value(json!({
            "url": ["http://www.worldcat.org/oclc/56064497?referer=xid"],
            "publisher": "Microsoft Press",
            "form": ["BA"],
            "lang": "eng",
            "city": "Redmond, Wash.",
            "author": "Steve McConnell.",
            "ed": "2nd ed.",
            "year": "2004",
            "isbn": ["0735619670"],
            "title": "Code complete",
            "oclcnum": ["56064497"]
        }))
        .unwrap();

        let book = normalize(record);
        assert_eq!(book.title, "Code complete");
        assert_eq!(book.published_date.as_deref(), Some("2004"));
        assert_eq!(book.authors, vec!["Steve McConnell."]);
        assert_eq!(book.publisher, "Microsoft Press");
        assert_eq!(book.language, "en");
        assert_eq!(book.print_type, PRINT_TYPE_BOOK);
        assert!(book.description.is_none());
        assert!(book.page_count.is_none());
        assert!(book.image_links.is_empty());
        assert!(book.categories.is_empty());
        assert!(book.industry_identifiers.is_empty());
    }

    #[test]
    fn normalize_without_author_or_publisher() {
        let book = normalize(WorldCatRecord {
            title: Some("Anonymous".to_string()),
            ..WorldCatRecord::default()
        });
        assert!(book.authors.is_empty());
        assert_eq!(book.publisher, "");
        assert_eq!(book.language, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn language_branches() {
        assert_eq!(normalize(record_in(Some("eng"))).language, "en");
        assert_eq!(normalize(record_in(Some("spa"))).language, "es");
        assert_eq!(normalize(record_in(Some("fre"))).language, "fr");
        assert_eq!(normalize(record_in(Some("jpn"))).language, UNKNOWN_LANGUAGE);
        assert_eq!(normalize(record_in(None)).language, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn not_found_signals() {
        let response: WorldCatResponse =
            serde_json::from_value(json!({"stat": "invalidId"})).unwrap();
        assert!(matches!(
            WorldCatClient::first_record("isbn", response),
            Err(ProviderError::NoBookFound { .. })
        ));

        let response: WorldCatResponse =
            serde_json::from_value(json!({"stat": "ok", "list": []})).unwrap();
        assert!(matches!(
            WorldCatClient::first_record("isbn", response),
            Err(ProviderError::MissingResult { .. })
        ));
    }

    #[tokio::test]
    async fn resolve_builds_metadata_request() {
        let mock_server = MockServer::start().await;
        let transport = HttpTransport::new(RequestDefaults::default()).unwrap();
        let client = WorldCatClient::new(
            WorldCatConfig {
                base_url: format!("{}/", mock_server.uri()),
            },
            transport,
        )
        .unwrap();

        Mock::given(method("GET"))
            .and(path("/webservices/xid/isbn/0735619670"))
            .and(query_param("method", "getMetadata"))
            .and(query_param("fl", "*"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "ok",
                "list": [{"title": "Code complete", "lang": "eng"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let book = client
            .resolve("0735619670", &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(book.title, "Code complete");
        assert_eq!(book.language, "en");
        assert_eq!(client.name(), "worldcat");
    }

    #[tokio::test]
    async fn isbn_stays_in_one_path_segment() {
        let mock_server = MockServer::start().await;
        let transport = HttpTransport::new(RequestDefaults::default()).unwrap();
        let client = WorldCatClient::new(
            WorldCatConfig {
                base_url: mock_server.uri(),
            },
            transport,
        )
        .unwrap();

        Mock::given(method("GET"))
            .and(path("/webservices/xid/isbn/07356%2F19670%3F"))
            .and(query_param("method", "getMetadata"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "ok",
                "list": [{"title": "Code complete"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let book = client
            .resolve("07356/19670?", &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(book.title, "Code complete");
    }
}
