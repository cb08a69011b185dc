//! Service tests against a mock HabitWire API.

use serde_json::json;
use skill_habitwire::client::ApiClient;
use skill_habitwire::key::{ApiKey, CreateKeyRequest, KeyService};
use skill_habitwire::system::ExportData;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), TOKEN).expect("client")
}

#[tokio::test]
async fn key_list_maps_to_lean_without_secrets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "k1", "name": "ci", "created_at": "2026-07-01T08:00:00Z"},
            {"id": "k2", "name": "deploy", "last_used": "2026-08-20T10:30:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let keys = KeyService::new(&client).list().await.expect("key list");

    let leans: Vec<_> = keys.iter().map(ApiKey::to_lean).collect();
    assert_eq!(leans[0].id, "k1");
    assert_eq!(leans[1].name, "deploy");

    // Listings carry no key value, so lean output has none either.
    let value = serde_json::to_value(&leans).expect("lean json");
    assert!(value[0].get("key").is_none());
}

#[tokio::test]
async fn key_create_posts_the_name_and_returns_the_secret_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/keys"))
        .and(body_json(json!({"name": "release-bot"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "k9",
            "name": "release-bot",
            "key": "hw_live_abc123",
            "created_at": "2026-08-25T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let created = KeyService::new(&client)
        .create(&CreateKeyRequest {
            name: "release-bot".to_string(),
        })
        .await
        .expect("created key");

    let value = serde_json::to_value(created.to_lean()).expect("lean json");
    assert_eq!(value["key"], "hw_live_abc123");
}

#[tokio::test]
async fn key_delete_hits_the_resource_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/keys/k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    KeyService::new(&client)
        .delete("k1")
        .await
        .expect("key deleted");
}

#[tokio::test]
async fn export_requests_the_format_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "habits": [{"id": 1, "name": "water"}],
            "categories": [],
            "checkins": [{"habit_id": 1, "date": "2026-08-24"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let data = client.get("/export?format=json").await.expect("export");

    let export: ExportData = serde_json::from_slice(&data).expect("export json");
    let value = serde_json::to_value(&export).expect("export json");
    assert_eq!(value["habits"][0]["name"], "water");
    assert_eq!(value["checkins"][0]["habit_id"], 1);
}

#[tokio::test]
async fn error_status_surfaces_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string(r#"{"status":"down"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get("/health").await.expect_err("error status");

    assert_eq!(err.to_string(), r#"API error (status 503): {"status":"down"}"#);
}
