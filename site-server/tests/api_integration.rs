//! Integration tests for the project HTTP API.
//!
//! Every test starts its own server through the shared TestServer harness
//! and drives it with JSON over HTTP.

mod common;

use common::TestServer;
use serde_json::{json, Value};

async fn send_command(client: &reqwest::Client, server: &TestServer, command: Value) -> Value {
    let resp = client
        .post(server.url("/api/projects/default/commands"))
        .json(&command)
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 200, "command failed: {command}");
    resp.json().await.expect("json body")
}

async fn get_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let resp = client.get(url).send().await.expect("request");
    let status = resp.status().as_u16();
    (status, resp.json().await.expect("json body"))
}

fn text_component(id: &str, x: f64, y: f64) -> Value {
    json!({
        "id": id,
        "type": "text",
        "content": format!("Text {id}"),
        "styles": { "x": x, "y": y, "width": 200, "height": 40 }
    })
}

// ==========================================================================
// Health
// ==========================================================================

#[tokio::test]
async fn test_health_reports_healthy() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["projects"], 1);

    server.shutdown().await;
}

// ==========================================================================
// Commands
// ==========================================================================

#[tokio::test]
async fn test_command_round_trip_with_undo() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let body = send_command(
        &client,
        &server,
        json!({ "type": "addComponent", "component": text_component("t1", 10.0, 10.0) }),
    )
    .await;
    assert_eq!(body["command"], "addComponent");
    assert_eq!(body["created"], "t1");
    assert_eq!(body["state"]["selectedId"], "t1");

    send_command(
        &client,
        &server,
        json!({ "type": "moveComponent", "id": "t1", "x": 300, "y": 200 }),
    )
    .await;
    send_command(&client, &server, json!({ "type": "saveHistory" })).await;

    let body = send_command(&client, &server, json!({ "type": "undo" })).await;
    assert_eq!(body["changed"], true);
    assert_eq!(body["state"]["components"][0]["styles"]["x"], 10.0);
    assert_eq!(body["state"]["canRedo"], true);

    let (status, design) = get_json(&client, server.url("/api/projects/default/design")).await;
    assert_eq!(status, 200);
    assert_eq!(design["canvasWidth"], 1440.0);
    assert_eq!(design["pages"][0]["components"][0]["id"], "t1");

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_component_is_reported_unchanged() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let body = send_command(
        &client,
        &server,
        json!({ "type": "removeComponent", "id": "ghost" }),
    )
    .await;
    assert_eq!(body["changed"], false);

    server.shutdown().await;
}

#[tokio::test]
async fn test_deleting_last_page_is_rejected() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/api/projects/default/commands"))
        .json(&json!({ "type": "deletePage", "pageId": "home" }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"], "Cannot delete the last page");

    server.shutdown().await;
}

#[tokio::test]
async fn test_commands_create_projects_on_demand() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/api/projects/landing/commands"))
        .json(&json!({ "type": "applyTemplate", "name": "Simple Landing Page" }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 200);

    let (_, list) = get_json(&client, server.url("/api/projects")).await;
    assert_eq!(list["projects"], json!(["default", "landing"]));

    let (status, summary) = get_json(&client, server.url("/api/projects/landing")).await;
    assert_eq!(status, 200);
    assert_eq!(summary["pages"][0]["componentCount"], 4);

    server.shutdown().await;
}

#[tokio::test]
async fn test_project_ids_must_be_file_safe() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/api/projects/my%20project/commands"))
        .json(&json!({ "type": "toggleGrid" }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 400);

    let (_, list) = get_json(&client, server.url("/api/projects")).await;
    assert_eq!(list["projects"], json!(["default"]));

    server.shutdown().await;
}

// ==========================================================================
// Import
// ==========================================================================

#[tokio::test]
async fn test_invalid_import_leaves_design_untouched() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    send_command(
        &client,
        &server,
        json!({ "type": "addComponent", "component": text_component("keep", 0.0, 0.0) }),
    )
    .await;

    for body in ["not json at all", r#"{"something":"else"}"#, "[1,2,3]"] {
        let resp = client
            .put(server.url("/api/projects/default/design"))
            .body(body)
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), 400, "body {body} should be rejected");
        let error: Value = resp.json().await.expect("json body");
        assert!(error["error"].is_string());
    }

    let (_, design) = get_json(&client, server.url("/api/projects/default/design")).await;
    assert_eq!(design["pages"][0]["components"][0]["id"], "keep");

    server.shutdown().await;
}

#[tokio::test]
async fn test_legacy_import_synthesizes_home_page() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let legacy = json!({
        "components": [text_component("old", 5.0, 5.0)],
        "canvasWidth": 1280,
        "canvasHeight": 900
    });
    let resp = client
        .put(server.url("/api/projects/default/design"))
        .body(legacy.to_string())
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 200);
    let summary: Value = resp.json().await.expect("json body");
    assert_eq!(summary["currentPageId"], "home");
    assert_eq!(summary["canvasWidth"], 1280.0);
    assert_eq!(summary["canvasHeight"], 900.0);
    assert_eq!(summary["canUndo"], false);

    server.shutdown().await;
}

// ==========================================================================
// Export
// ==========================================================================

#[tokio::test]
async fn test_export_targets() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    send_command(
        &client,
        &server,
        json!({ "type": "addComponent", "component": text_component("hello", 0.0, 0.0) }),
    )
    .await;

    let (status, html) = get_json(&client, server.url("/api/projects/default/export/html")).await;
    assert_eq!(status, 200);
    assert_eq!(html["target"], "html");
    let names: Vec<&str> = html["artifacts"]
        .as_array()
        .expect("artifacts")
        .iter()
        .filter_map(|a| a["filename"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["index.html", "styles.css", "script.js", "README.md"]
    );

    let (status, react) = get_json(&client, server.url("/api/projects/default/export/react")).await;
    assert_eq!(status, 200);
    let source = react["artifacts"][0]["content"].as_str().expect("source");
    assert!(source.contains("function HomePage()"));

    let (status, single) =
        get_json(&client, server.url("/api/projects/default/export/html-single")).await;
    assert_eq!(status, 200);
    assert_eq!(single["artifacts"].as_array().map(Vec::len), Some(1));

    let (status, _) = get_json(&client, server.url("/api/projects/default/export/pdf")).await;
    assert_eq!(status, 404);

    let (status, _) = get_json(&client, server.url("/api/projects/missing/export/json")).await;
    assert_eq!(status, 404);

    server.shutdown().await;
}

// ==========================================================================
// Persistence
// ==========================================================================

#[tokio::test]
async fn test_save_requires_data_dir() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/api/projects/default/save"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 409);

    server.shutdown().await;
}

#[tokio::test]
async fn test_saved_project_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = reqwest::Client::new();

    let server = TestServer::start_with_data_dir(dir.path()).await;
    send_command(
        &client,
        &server,
        json!({ "type": "addComponent", "component": text_component("persisted", 1.0, 2.0) }),
    )
    .await;
    let resp = client
        .post(server.url("/api/projects/default/save"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), 200);
    assert!(dir.path().join("default.json").exists());
    server.shutdown().await;

    let server = TestServer::start_with_data_dir(dir.path()).await;
    let loaded = server.store().load_all().expect("load");
    assert_eq!(loaded, vec!["default".to_string()]);
    let (_, design) = get_json(&client, server.url("/api/projects/default/design")).await;
    assert_eq!(design["pages"][0]["components"][0]["id"], "persisted");
    server.shutdown().await;
}
