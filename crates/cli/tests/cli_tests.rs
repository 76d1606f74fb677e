// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the batch runner against mocked providers

use clap::Parser;
use isbn_cli::{Args, CliError, ResolverConfig, RunSummary, run};
use serde_json::{Value, json};
use tokio_test::assert_ok;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

async fn mount_google(mock_server: &MockServer, isbn: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("q", format!("isbn:{isbn}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

async fn run_with(mock_server: &MockServer, argv: &[&str]) -> (Result<RunSummary, CliError>, String) {
    let args = Args::try_parse_from(argv).unwrap();
    let resolver = ResolverConfig::for_testing(&mock_server.uri())
        .build_resolver()
        .unwrap();

    let mut out = Vec::new();
    let result = run(&args, &resolver, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn prints_each_resolved_book() {
    let mock_server = MockServer::start().await;
    mount_google(
        &mock_server,
        "0735619670",
        json!({"totalItems": 1, "items": [{"volumeInfo": {"title": "Code Complete"}}]}),
    )
    .await;
    mount_google(
        &mock_server,
        "0201633612",
        json!({"totalItems": 1, "items": [{"volumeInfo": {"title": "Design Patterns"}}]}),
    )
    .await;

    let (result, output) = run_with(
        &mock_server,
        &["isbn", "--compact", "-p", "google", "0735619670", "0201633612"],
    )
    .await;

    let summary = assert_ok!(result);
    assert_eq!(summary, RunSummary { resolved: 2, failed: 0 });
    assert!(summary.is_success());

    let titles: Vec<String> = output
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).unwrap()["title"].to_string())
        .collect();
    assert_eq!(titles, vec!["\"Code Complete\"", "\"Design Patterns\""]);
}

#[tokio::test]
async fn failures_are_counted_not_fatal() {
    let mock_server = MockServer::start().await;
    mount_google(
        &mock_server,
        "0735619670",
        json!({"totalItems": 1, "items": [{"volumeInfo": {"title": "Code Complete"}}]}),
    )
    .await;
    mount_google(&mock_server, "missing", json!({"totalItems": 0})).await;

    let (result, output) =
        run_with(&mock_server, &["isbn", "-p", "google", "missing", "0735619670"]).await;

    let summary = assert_ok!(result);
    assert_eq!(summary, RunSummary { resolved: 1, failed: 1 });
    assert!(!summary.is_success());

    let book: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(book["title"], "Code Complete");
    assert_eq!(book["printType"], "BOOK");
}

#[tokio::test]
async fn unknown_provider_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (result, output) = run_with(&mock_server, &["isbn", "-p", "amazon", "0735619670"]).await;

    assert!(matches!(result, Err(CliError::Validation(_))));
    assert!(output.is_empty());
}
