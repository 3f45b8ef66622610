use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{WikiClient, WikiError};

const PREFIX: &str = "Categoría:Fauna_endémica_de_";

fn client_for(server: &MockServer) -> WikiClient {
    WikiClient::new(&server.uri(), PREFIX).unwrap()
}

#[test]
fn category_title_replaces_spaces() {
    let client = WikiClient::new("https://es.wikipedia.org", PREFIX).unwrap();
    assert_eq!(client.category_title("Costa Rica"), "Categoría:Fauna_endémica_de_Costa_Rica");
    assert_eq!(client.category_title("Chile"), "Categoría:Fauna_endémica_de_Chile");
}

#[test]
fn rejects_non_base_url() {
    let err = WikiClient::new("mailto:someone@example.com", PREFIX).unwrap_err();
    assert!(matches!(err, WikiError::InvalidUrl { .. }));
}

#[tokio::test]
async fn category_members_first_page_has_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "categorymembers"))
        .and(query_param("cmtitle", "Categoría:Fauna_endémica_de_Chile"))
        .and(query_param("cmlimit", "100"))
        .and(query_param("format", "json"))
        .and(query_param("origin", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "continue": {"cmcontinue": "page|ABC|123", "continue": "-||"},
            "query": {"categorymembers": [
                {"pageid": 1, "ns": 0, "title": "Pudú"},
                {"pageid": 2, "ns": 0, "title": "Monito del monte"}
            ]}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .category_members(&client.category_title("Chile"), None)
        .await
        .unwrap();
    let titles: Vec<&str> = page.members.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Pudú", "Monito del monte"]);
    assert_eq!(page.next_cursor.as_deref(), Some("page|ABC|123"));
}

#[tokio::test]
async fn category_members_sends_cursor_and_ends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("cmcontinue", "page|ABC|123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {"categorymembers": [{"pageid": 3, "ns": 0, "title": "Chungungo"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .category_members("Categoría:Fauna_endémica_de_Chile", Some("page|ABC|123"))
        .await
        .unwrap();
    assert_eq!(page.members.len(), 1);
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn missing_category_yields_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"batchcomplete": ""})))
        .mount(&server)
        .await;

    let page = client_for(&server).category_members("Categoría:Nada", None).await.unwrap();
    assert!(page.members.is_empty());
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn category_listing_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).category_members("Categoría:X", None).await.unwrap_err();
    match err {
        WikiError::HttpStatus { code, body } => {
            assert_eq!(code, 503);
            assert_eq!(body, "overloaded");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn category_listing_bad_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).category_members("Categoría:X", None).await.unwrap_err();
    assert!(matches!(err, WikiError::JsonParse { .. }));
}

#[tokio::test]
async fn page_summary_extracts_description_and_thumbnail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Monito%20del%20monte"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Monito del monte",
            "extract": "Marsupial endémico de Chile.",
            "thumbnail": {"source": "https://upload.wikimedia.org/monito.jpg", "width": 320}
        })))
        .mount(&server)
        .await;

    let summary = client_for(&server).page_summary("Monito del monte").await.unwrap();
    assert_eq!(summary.description(), "Marsupial endémico de Chile.");
    assert_eq!(summary.image_url().as_deref(), Some("https://upload.wikimedia.org/monito.jpg"));
}

#[tokio::test]
async fn page_summary_without_extract_or_thumbnail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Chungungo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "Chungungo"})))
        .mount(&server)
        .await;

    let summary = client_for(&server).page_summary("Chungungo").await.unwrap();
    assert_eq!(summary.description(), "");
    assert!(summary.image_url().is_none());
}

#[tokio::test]
async fn page_summary_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Nadie"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"type": "not_found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).page_summary("Nadie").await.unwrap_err();
    assert!(matches!(err, WikiError::HttpStatus { code: 404, .. }));
}
