//! Service tests against a mock Vikunja API.

use serde_json::json;
use skill_vikunja::client::ApiClient;
use skill_vikunja::label::{LabelChanges, LabelService};
use skill_vikunja::project::ProjectService;
use skill_vikunja::task::{Task, TaskChanges, TaskService};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), TOKEN).expect("client")
}

#[tokio::test]
async fn task_list_filters_by_project_client_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/all"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "One", "project_id": 1},
            {"id": 2, "title": "Two", "project_id": 2},
            {"id": 3, "title": "Three", "project_id": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let tasks = TaskService::new(&client)
        .list(Some(1))
        .await
        .expect("task list");

    let ids: Vec<i64> = tasks.iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn task_create_puts_into_the_project_collection() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/projects/7/tasks"))
        .and(body_json(json!({"title": "Water the plants", "priority": 2})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 99,
            "title": "Water the plants",
            "priority": 2,
            "project_id": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let task = Task {
        title: "Water the plants".to_string(),
        priority: Some(2),
        ..Task::default()
    };
    let created = TaskService::new(&client)
        .create(7, &task)
        .await
        .expect("created task");

    assert_eq!(created.id, Some(99));
    assert_eq!(created.to_lean().project_id, 7);
}

#[tokio::test]
async fn task_update_posts_the_merged_full_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "title": "Old title",
            "done": false,
            "priority": 4,
            "project_id": 2,
            "description": "keep me"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The unchanged description and priority must ride along, or the API
    // would blank them.
    Mock::given(method("POST"))
        .and(path("/tasks/9"))
        .and(body_json(json!({
            "id": 9,
            "title": "New title",
            "done": true,
            "priority": 4,
            "project_id": 2,
            "description": "keep me"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "title": "New title",
            "done": true,
            "priority": 4,
            "project_id": 2,
            "description": "keep me"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let changes = TaskChanges {
        title: Some("New title".to_string()),
        done: Some(true),
        ..TaskChanges::default()
    };
    let updated = TaskService::new(&client)
        .update(9, &changes)
        .await
        .expect("updated task");

    assert_eq!(updated.done, Some(true));
    assert_eq!(updated.description.as_deref(), Some("keep me"));
}

#[tokio::test]
async fn task_label_attach_and_detach_use_the_label_routes() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/1/labels"))
        .and(body_json(json!({"label_id": 2})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"label_id": 2})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/1/labels/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let service = TaskService::new(&client);
    service.add_label(1, 2).await.expect("label attached");
    service.remove_label(1, 2).await.expect("label detached");
}

#[tokio::test]
async fn label_create_is_a_put_and_update_is_a_post() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/labels"))
        .and(body_json(json!({"title": "urgent", "hex_color": "ff0000"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "title": "urgent",
            "hex_color": "ff0000"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/labels/5"))
        .and(body_json(json!({"title": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "title": "renamed",
            "hex_color": "ff0000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let service = LabelService::new(&client);

    let label = skill_vikunja::label::Label {
        title: "urgent".to_string(),
        hex_color: Some("ff0000".to_string()),
        ..Default::default()
    };
    let created = service.create(&label).await.expect("created label");
    assert_eq!(created.id, Some(5));

    let changes = LabelChanges {
        title: Some("renamed".to_string()),
        ..LabelChanges::default()
    };
    let updated = service.update(5, &changes).await.expect("updated label");
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.to_lean().hex_color, "ff0000");
}

#[tokio::test]
async fn project_list_maps_to_lean() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Inbox", "description": "default project"},
            {"id": 2, "title": "Garden"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let projects = ProjectService::new(&client).list().await.expect("projects");

    let leans: Vec<_> = projects.iter().map(|p| p.to_lean()).collect();
    assert_eq!(leans[0].title, "Inbox");
    assert_eq!(leans[1].id, 2);
}

#[tokio::test]
async fn error_status_surfaces_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/labels"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message":"internal error"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = LabelService::new(&client)
        .list()
        .await
        .expect_err("error status");

    assert_eq!(
        err.to_string(),
        r#"API error (status 500): {"message":"internal error"}"#
    );
}
