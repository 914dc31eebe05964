//! End-to-end fetch flow against a mock documentation site: real
//! strategies, real cache, first-call network fetch, second-call cache
//! hit with zero network activity.

use std::sync::Arc;

use reqwest::Client;
use tempfile::TempDir;
use uidocs_core::cache::CacheStore;
use uidocs_core::strategy::{DirectStrategy, FetchStrategy, HtmlStrategy};
use uidocs_core::{ContentType, FetchOptions, FetchService, SourceStrategy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server_uri: &str, temp: &TempDir) -> FetchService {
    let client = Client::new();
    let strategies: Vec<Box<dyn FetchStrategy>> = vec![
        Box::new(DirectStrategy::new(client.clone(), ".md")),
        Box::new(HtmlStrategy::new(client)),
    ];
    let cache = Arc::new(CacheStore::new(temp.path(), 16, chrono::Duration::days(7)));
    FetchService::with_strategies(cache, strategies, server_uri)
}

#[tokio::test]
async fn component_fetch_then_cache_hit() {
    let server = MockServer::start().await;
    // expect(1): the second fetch must never reach the network
    Mock::given(method("GET"))
        .and(path("/docs/components/button.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Button\n\nA clickable button."))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let service = service(&server.uri(), &temp);

    let first = service
        .fetch_component("button", FetchOptions::default())
        .await
        .unwrap();
    assert!(first.success);
    assert_eq!(first.source_strategy, SourceStrategy::Direct);
    assert_eq!(first.content_type, ContentType::Component);
    assert_eq!(first.metadata.title.as_deref(), Some("Button"));
    assert!(first.content.as_deref().unwrap().contains("A clickable button."));

    let second = service
        .fetch_component("button", FetchOptions::default())
        .await
        .unwrap();
    assert_eq!(second.source_strategy, SourceStrategy::Cache);
    assert_eq!(second.content, first.content);
    assert_eq!(second.metadata, first.metadata);

    server.verify().await;
}

#[tokio::test]
async fn direct_miss_falls_back_to_html_scrape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/theming.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/theming"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Theming</title></head><body>\
             <main><h1>Theming</h1><p>Use CSS variables to theme components.</p></main>\
             </body></html>",
        ))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let service = service(&server.uri(), &temp);

    let result = service.fetch_doc("theming", FetchOptions::default()).await.unwrap();
    assert!(result.success);
    assert_eq!(result.source_strategy, SourceStrategy::Html);
    assert!(result.content.unwrap().contains("CSS variables"));
}

#[tokio::test]
async fn total_failure_surfaces_an_error_and_caches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/nope.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let service = service(&server.uri(), &temp);

    let err = service.fetch_doc("nope", FetchOptions::default()).await.unwrap_err();
    assert!(err.to_string().contains("404"));
    assert_eq!(service.cache().stats(), (0, 0));
}
