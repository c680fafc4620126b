//! Shared helpers for provider integration tests

#![allow(dead_code)]

use kineticpanel_domain::ProviderConfig;
use kineticpanel_infra::Provider;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_KEY: &str = "ptla_integration_key";

/// Provider wired to `server` through the real Transport Client
pub fn provider_for(server: &MockServer, use_application: bool) -> Provider {
    let mut provider = Provider::new("0.0.0-test");
    provider
        .configure(ProviderConfig {
            host: Some(server.uri()),
            api_key: Some(API_KEY.to_string()),
            use_application: Some(use_application),
            debug: Some(true),
        })
        .expect("provider should configure");
    provider
}

pub fn server_attributes(id: i64, name: &str, memory: i64) -> Value {
    json!({
        "object": "server",
        "attributes": {
            "id": id,
            "name": name,
            "user": 1,
            "egg": 5,
            "location": 2,
            "node": 3,
            "memory": memory,
            "disk": 20480,
            "cpu": 200,
            "docker_image": "ghcr.io/pterodactyl/yolks:java_17",
            "startup": "java -Xms128M -jar server.jar"
        }
    })
}

pub fn desired_server(memory: i64) -> Value {
    json!({
        "name": "survival",
        "user_id": 1,
        "egg_id": 5,
        "location_id": 2,
        "node_id": 3,
        "memory": memory,
        "disk": 20480,
        "cpu": 200,
        "docker_image": "ghcr.io/pterodactyl/yolks:java_17",
        "startup_command": "java -Xms128M -jar server.jar"
    })
}
