use std::sync::Arc;

use fauna_storage::test_support::MemoryStore;
use fauna_wiki::WikiClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{Ingestor, InsertOutcome};

const PREFIX: &str = "Categoría:Fauna_endémica_de_";

fn ingestor(server: &MockServer, store: &Arc<MemoryStore>) -> Ingestor {
    let wiki = WikiClient::new(&server.uri(), PREFIX).unwrap();
    Ingestor::new(wiki, Arc::clone(store) as Arc<dyn fauna_storage::AnimalStore>)
}

fn members(titles: &[&str]) -> serde_json::Value {
    json!(titles.iter().map(|t| json!({"ns": 0, "title": t})).collect::<Vec<_>>())
}

async fn mount_listing(
    server: &MockServer,
    country: &str,
    cursor: Option<&str>,
    body: serde_json::Value,
) {
    let category = format!("{PREFIX}{}", country.replace(' ', "_"));
    let mock =
        Mock::given(method("GET")).and(path("/w/api.php")).and(query_param("cmtitle", category));
    let mock = match cursor {
        Some(c) => mock.and(query_param("cmcontinue", c)),
        None => mock.and(query_param_is_missing("cmcontinue")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body)).mount(server).await;
}

async fn mount_summary(server: &MockServer, encoded_title: &str, extract: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/rest_v1/page/summary/{encoded_title}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "extract": extract,
            "thumbnail": {"source": format!("https://img/{encoded_title}.jpg")}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn follows_cursor_and_inserts_one_batch() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "Chile",
        None,
        json!({
            "continue": {"cmcontinue": "next-1"},
            "query": {"categorymembers": members(&["Pudu", "Chungungo"])}
        }),
    )
    .await;
    mount_listing(
        &server,
        "Chile",
        Some("next-1"),
        json!({"query": {"categorymembers": members(&["Degu"])}}),
    )
    .await;
    mount_summary(&server, "Pudu", "Ciervo").await;
    mount_summary(&server, "Chungungo", "Nutria").await;
    mount_summary(&server, "Degu", "Roedor").await;

    let store = Arc::new(MemoryStore::new());
    let report = ingestor(&server, &store).ingest_country("Chile").await;

    assert_eq!(report.found, 3);
    assert_eq!(report.outcome, InsertOutcome::Inserted(3));
    assert!(!report.listing_aborted);
    assert_eq!(store.insert_calls(), 1);

    let rows = store.rows();
    let titles: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(titles, vec!["Pudu", "Chungungo", "Degu"]);
    let pudu = &rows[0];
    assert_eq!(pudu.country, "Chile");
    assert_eq!(pudu.wikipedia_title.as_deref(), Some("Pudu"));
    assert_eq!(pudu.description.as_deref(), Some("Ciervo"));
    assert_eq!(pudu.image_url.as_deref(), Some("https://img/Pudu.jpg"));
}

#[tokio::test]
async fn empty_category_inserts_nothing() {
    let server = MockServer::start().await;
    mount_listing(&server, "Isla de Pascua", None, json!({"batchcomplete": ""})).await;

    let store = Arc::new(MemoryStore::new());
    let report = ingestor(&server, &store).ingest_country("Isla de Pascua").await;

    assert_eq!(report.found, 0);
    assert_eq!(report.outcome, InsertOutcome::Empty);
    assert_eq!(store.insert_calls(), 0);
}

#[tokio::test]
async fn summary_failure_skips_only_that_member() {
    let server = MockServer::start().await;
    let listing = json!({"query": {"categorymembers": members(&["Vicuna", "Roto"])}});
    mount_listing(&server, "Perú", None, listing).await;
    mount_summary(&server, "Vicuna", "Camélido").await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Roto"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let report = ingestor(&server, &store).ingest_country("Perú").await;

    assert_eq!(report.found, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.outcome, InsertOutcome::Inserted(1));
    assert_eq!(store.rows()[0].name, "Vicuna");
}

#[tokio::test]
async fn listing_failure_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "Cuba",
        None,
        json!({
            "continue": {"cmcontinue": "more"},
            "query": {"categorymembers": members(&["Almiqui"])}
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("cmcontinue", "more"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_summary(&server, "Almiqui", "Mamífero").await;

    let store = Arc::new(MemoryStore::new());
    let report = ingestor(&server, &store).ingest_country("Cuba").await;

    assert!(report.listing_aborted);
    assert_eq!(report.outcome, InsertOutcome::Inserted(1));
    assert_eq!(store.rows().len(), 1);
}

#[tokio::test]
async fn rerun_hits_unique_constraint_without_aborting() {
    let server = MockServer::start().await;
    for country in ["Chile", "Cuba"] {
        let listing = json!({"query": {"categorymembers": members(&[country])}});
        mount_listing(&server, country, None, listing).await;
        mount_summary(&server, country, "x").await;
    }

    let store = Arc::new(MemoryStore::new());
    let ingestor = ingestor(&server, &store);
    let countries = vec!["Chile".to_owned(), "Cuba".to_owned()];

    let first = ingestor.run(&countries).await;
    assert_eq!(first.inserted, 2);

    let second = ingestor.run(&countries).await;
    assert_eq!(second.countries, 2);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.already_present, 2);
    assert_eq!(store.rows().len(), 2);
}

#[tokio::test]
async fn other_insert_errors_abandon_batch_and_continue() {
    let server = MockServer::start().await;
    for country in ["Chile", "Cuba"] {
        let listing = json!({"query": {"categorymembers": members(&[country])}});
        mount_listing(&server, country, None, listing).await;
        mount_summary(&server, country, "x").await;
    }

    let store = Arc::new(MemoryStore::new());
    store.fail_inserts_with("connection reset");
    let summary = ingestor(&server, &store).run(&["Chile".to_owned(), "Cuba".to_owned()]).await;

    assert_eq!(summary.countries, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(store.insert_calls(), 2);
    assert!(store.rows().is_empty());
}
