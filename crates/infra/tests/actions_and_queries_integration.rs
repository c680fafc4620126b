//! Integration tests for action resources and read-only queries over the
//! client API namespace.

mod support;

use kineticpanel_domain::ErrorCategory;
use serde_json::json;
use support::provider_for;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_power_signal_gets_synthetic_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/client/servers/abc123/power"))
        .and(body_json(json!({"signal": "restart"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, false);
    let power = provider.resource("kineticpanel_server_power").unwrap();

    let created = power.create_json(json!({"server_id": "abc123", "signal": "restart"})).await.unwrap();
    assert_eq!(created["id"], "abc123-power");
    assert_eq!(created["signal"], "restart");
}

#[tokio::test]
async fn test_startup_variable_update_keeps_identity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/client/servers/abc123/startup/variable"))
        .and(body_json(json!({"key": "MAX_PLAYERS", "value": "40"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, false);
    let variable = provider.resource("kineticpanel_server_startup_variable").unwrap();

    let prior = json!({
        "server_id": "abc123",
        "key": "MAX_PLAYERS",
        "value": "20",
        "id": "abc123-var-MAX_PLAYERS"
    });
    let desired = json!({"server_id": "abc123", "key": "MAX_PLAYERS", "value": "40"});

    let updated = variable.update_json(prior, desired).await.unwrap();
    assert_eq!(updated["id"], "abc123-var-MAX_PLAYERS");
    assert_eq!(updated["value"], "40");
}

#[tokio::test]
async fn test_action_delete_makes_no_request() {
    let server = MockServer::start().await;

    let provider = provider_for(&server, false);
    let command = provider.resource("kineticpanel_server_command").unwrap();

    command
        .delete_json(json!({"server_id": "abc123", "command": "say hi", "id": "abc123-cmd"}))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_import_rules_per_action() {
    let server = MockServer::start().await;
    let provider = provider_for(&server, false);

    let rename = provider.resource("kineticpanel_server_rename").unwrap();
    let imported = rename.import_json("abc123").await.unwrap();
    assert_eq!(imported["id"], "abc123-rename");

    let variable = provider.resource("kineticpanel_server_startup_variable").unwrap();
    let imported = variable.import_json("abc123:SERVER_JAR").await.unwrap();
    assert_eq!(imported["id"], "abc123-var-SERVER_JAR");
    assert_eq!(imported["key"], "SERVER_JAR");

    let reinstall = provider.resource("kineticpanel_server_reinstall").unwrap();
    let err = reinstall.import_json("abc123").await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Input);
}

#[tokio::test]
async fn test_utilization_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/client/servers/abc123/utilization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "stats",
            "attributes": {
                "state": "running",
                "memory": 2147483648_i64,
                "cpu": 37.456,
                "disk": 524288000,
                "network": {"rx": 1024, "tx": 2048},
                "uptime": 3600
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, false);
    let snapshot = provider
        .query("kineticpanel_server_utilization")
        .unwrap()
        .query_json(json!({"server_id": "abc123"}))
        .await
        .unwrap();

    assert_eq!(snapshot["state"], "running");
    assert_eq!(snapshot["memory_mb"], 2048.0);
    assert_eq!(snapshot["cpu_percent"], 37.46);
    assert_eq!(snapshot["disk_mb"], 500.0);
    assert_eq!(snapshot["network_rx_bytes"], 1024);
}

#[tokio::test]
async fn test_activity_logs_are_clamped_and_newest_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/client/servers/abc123/websocket"))
        .and(query_param("logs", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"event": "console output", "args": ["boot ok"], "timestamp": "2026-01-01T00:00:00Z"},
                {"event": "status", "args": ["running"], "timestamp": "2026-01-01T00:00:01Z"},
                {"event": "console output", "args": ["\u{1b}[33mready\u{1b}[0m"], "timestamp": "2026-01-01T00:00:02Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, false);
    let snapshot = provider
        .query("kineticpanel_server_activity_logs")
        .unwrap()
        .query_json(json!({"server_id": "abc123", "lines": 500}))
        .await
        .unwrap();

    assert_eq!(snapshot["lines"], 100);
    assert_eq!(snapshot["logs"], json!(["ready", "boot ok"]));
    assert_eq!(
        snapshot["timestamps"],
        json!(["2026-01-01T00:00:02Z", "2026-01-01T00:00:00Z"])
    );
}

#[tokio::test]
async fn test_server_query_on_missing_server_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/client/servers/gone1234"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, false);
    let err = provider
        .query("kineticpanel_server")
        .unwrap()
        .query_json(json!({"server_id": "gone1234"}))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().starts_with("query kineticpanel_server failed"));
}
