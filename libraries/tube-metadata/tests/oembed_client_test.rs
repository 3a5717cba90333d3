//! oEmbed client tests
//!
//! These tests use mock servers to verify client behavior without
//! reaching the real endpoint.

use tube_core::{ItemId, MetadataLookup, TubeError};
use tube_metadata::{fetch_item, OEmbedClient, OEmbedConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OEmbedClient {
    OEmbedClient::new(OEmbedConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_lookup_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param(
            "url",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        ))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Never Gonna Give You Up",
            "author_name": "Rick Astley",
            "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
            "type": "video"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let metadata = client_for(&server)
        .lookup(&ItemId::new("dQw4w9WgXcQ"))
        .await
        .unwrap();

    assert_eq!(metadata.title, "Never Gonna Give You Up");
    assert_eq!(
        metadata.thumbnail_url,
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    );
}

#[tokio::test]
async fn test_lookup_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .lookup(&ItemId::new("xxxxxxxxxxx"))
        .await;

    match result {
        Err(TubeError::MetadataLookupFailed { id, reason }) => {
            assert_eq!(id, "xxxxxxxxxxx");
            assert!(reason.contains("404"));
        }
        other => panic!("Expected MetadataLookupFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_unparseable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .lookup(&ItemId::new("dQw4w9WgXcQ"))
        .await;

    assert!(matches!(
        result,
        Err(TubeError::MetadataLookupFailed { .. })
    ));
}

#[tokio::test]
async fn test_fetch_item_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Song",
            "thumbnail_url": "https://img.example/thumb.jpg"
        })))
        .mount(&server)
        .await;

    let link = "https://www.youtube.com/watch?v=a_b-C1d2E3f&t=42";
    let item = fetch_item(&client_for(&server), link).await.unwrap();

    assert_eq!(item.id.as_str(), "a_b-C1d2E3f");
    assert_eq!(item.title, "Song");
    assert_eq!(item.thumbnail_url, "https://img.example/thumb.jpg");
    assert_eq!(item.source_url, link);
}

#[tokio::test]
async fn test_fetch_item_invalid_link_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = fetch_item(&client_for(&server), "hello world").await;
    assert!(matches!(result, Err(TubeError::InvalidLink(_))));
}
