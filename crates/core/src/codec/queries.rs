//! Decoders for read-only query snapshots (self-service API)

use std::collections::BTreeMap;

use kineticpanel_domain::{
    Allocation, FeatureLimits, Result, ServerLimits, ServerSnapshot, ServerSummary,
    StartupSnapshot, UtilizationSnapshot,
};
use serde::Deserialize;
use serde_json::Value;

use super::{envelope, parse_value, units};
use crate::console::ConsoleEntry;

#[derive(Debug, Deserialize)]
struct WireServerDetail {
    identifier: String,
    internal_id: i64,
    #[serde(default)]
    uuid: Option<String>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "suspended")]
    is_suspended: bool,
    #[serde(default)]
    is_installing: bool,
    #[serde(default)]
    is_transferring: bool,
    #[serde(default)]
    node: String,
    #[serde(default)]
    sftp_details: WireSftp,
    #[serde(default)]
    invocation: String,
    #[serde(default)]
    docker_image: String,
    #[serde(default)]
    egg_features: Option<Vec<String>>,
    #[serde(default)]
    feature_limits: FeatureLimits,
    #[serde(default)]
    limits: ServerLimits,
}

#[derive(Debug, Default, Deserialize)]
struct WireSftp {
    #[serde(default)]
    ip: String,
    #[serde(default)]
    port: i64,
}

#[derive(Debug, Deserialize)]
struct WireAllocation {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    ip: String,
    #[serde(default)]
    port: i64,
    #[serde(default)]
    is_default: bool,
}

#[derive(Debug, Deserialize)]
struct WireVariable {
    env_variable: String,
    #[serde(default)]
    server_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireServerSummary {
    identifier: String,
    internal_id: i64,
    #[serde(default)]
    uuid: Option<String>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    node: String,
    #[serde(default, alias = "suspended")]
    is_suspended: bool,
    #[serde(default)]
    server_owner: bool,
    #[serde(default)]
    docker_image: Option<String>,
    #[serde(default)]
    container: Option<WireContainer>,
    #[serde(default)]
    invocation: String,
    #[serde(default)]
    limits: ServerLimits,
    #[serde(default)]
    allocation: Option<WireAllocation>,
}

#[derive(Debug, Deserialize)]
struct WireContainer {
    #[serde(default)]
    image: String,
}

#[derive(Debug, Deserialize)]
struct WireUtilization {
    #[serde(default, alias = "current_state")]
    state: String,
    #[serde(default, alias = "cpu_absolute")]
    cpu: f64,
    #[serde(default, alias = "memory_bytes")]
    memory: i64,
    #[serde(default, alias = "disk_bytes")]
    disk: i64,
    #[serde(default)]
    network: WireNetwork,
    #[serde(default)]
    network_rx_bytes: Option<i64>,
    #[serde(default)]
    network_tx_bytes: Option<i64>,
    #[serde(default)]
    uptime: i64,
}

#[derive(Debug, Default, Deserialize)]
struct WireNetwork {
    #[serde(default)]
    rx: i64,
    #[serde(default)]
    tx: i64,
}

#[derive(Debug, Deserialize)]
struct WireStartup {
    #[serde(default)]
    startup: String,
    #[serde(default)]
    egg: Option<i64>,
    #[serde(default)]
    image: String,
    #[serde(default)]
    environment: BTreeMap<String, String>,
}

/// Decode the detailed view of one server.
///
/// # Errors
/// Returns `PanelError::Decode` if the identifier, internal id or name is
/// missing or the body is not JSON.
pub fn decode_server_snapshot(server_id: &str, body: &[u8]) -> Result<ServerSnapshot> {
    let root = parse_value(body)?;
    let user_permissions = root
        .pointer("/meta/user_permissions")
        .filter(|perms| !perms.is_null())
        .cloned()
        .map(serde_json::from_value::<Vec<String>>)
        .transpose()?;

    let entity = envelope::unwrap_attributes(root);
    let allocation = default_allocation(&entity);
    let environment = environment(&entity);
    let wire: WireServerDetail = serde_json::from_value(entity)?;

    Ok(ServerSnapshot {
        server_id: server_id.to_string(),
        id: wire.identifier.clone(),
        identifier: wire.identifier,
        internal_id: wire.internal_id,
        uuid: wire.uuid,
        name: wire.name,
        description: wire.description,
        is_suspended: wire.is_suspended,
        is_installing: wire.is_installing,
        is_transferring: wire.is_transferring,
        node: wire.node,
        sftp_ip: wire.sftp_details.ip,
        sftp_port: wire.sftp_details.port,
        invocation: wire.invocation,
        docker_image: wire.docker_image,
        limits: wire.limits,
        allocation,
        environment,
        egg_features: wire.egg_features,
        feature_limits: wire.feature_limits,
        user_permissions,
    })
}

/// Decode the server list, preserving API order.
///
/// # Errors
/// Returns `PanelError::Decode` if the body is not a collection or an entry
/// lacks its identifier, internal id or name.
pub fn decode_server_list(body: &[u8]) -> Result<Vec<ServerSummary>> {
    envelope::collection(parse_value(body)?)?.into_iter().map(decode_server_summary).collect()
}

fn decode_server_summary(entity: Value) -> Result<ServerSummary> {
    let related = default_allocation(&entity);
    let wire: WireServerSummary = serde_json::from_value(entity)?;

    let allocation = match wire.allocation {
        Some(alloc) => Allocation { id: alloc.id, ip: alloc.ip, port: alloc.port },
        None => related,
    };
    let docker_image = wire
        .docker_image
        .or_else(|| wire.container.map(|container| container.image))
        .unwrap_or_default();

    Ok(ServerSummary {
        identifier: wire.identifier,
        internal_id: wire.internal_id,
        uuid: wire.uuid,
        name: wire.name,
        description: wire.description,
        node: wire.node,
        is_suspended: wire.is_suspended,
        server_owner: wire.server_owner,
        docker_image,
        invocation: wire.invocation,
        limits: wire.limits,
        allocation,
    })
}

/// Decode live resource usage.
///
/// Accepts both the flat shape and the `{current_state, resources: {..}}`
/// shape.
///
/// # Errors
/// Returns `PanelError::Decode` for malformed JSON.
pub fn decode_utilization(server_id: &str, body: &[u8]) -> Result<UtilizationSnapshot> {
    let mut entity = envelope::unwrap_attributes(parse_value(body)?);
    let resources = entity.as_object_mut().and_then(|map| map.remove("resources"));
    if let (Some(Value::Object(resources)), Some(map)) = (resources, entity.as_object_mut()) {
        map.extend(resources);
    }
    let wire: WireUtilization = serde_json::from_value(entity)?;

    Ok(UtilizationSnapshot {
        server_id: server_id.to_string(),
        state: wire.state,
        cpu_percent: units::round_half_up(wire.cpu, 2),
        memory_bytes: wire.memory,
        memory_mb: units::bytes_to_mb(wire.memory),
        disk_bytes: wire.disk,
        disk_mb: units::bytes_to_mb(wire.disk),
        network_rx_bytes: wire.network_rx_bytes.unwrap_or(wire.network.rx),
        network_tx_bytes: wire.network_tx_bytes.unwrap_or(wire.network.tx),
        uptime_seconds: wire.uptime,
    })
}

/// Decode the startup configuration.
///
/// # Errors
/// Returns `PanelError::Decode` for malformed JSON.
pub fn decode_startup(server_id: &str, body: &[u8]) -> Result<StartupSnapshot> {
    let wire: WireStartup = serde_json::from_value(envelope::unwrap_attributes(parse_value(body)?))?;

    Ok(StartupSnapshot {
        server_id: server_id.to_string(),
        startup_command: wire.startup,
        egg_id: wire.egg,
        docker_image: wire.image,
        environment: wire.environment,
    })
}

/// Decode the websocket log buffer, oldest entry first.
///
/// # Errors
/// Returns `PanelError::Decode` if the body is not a collection of entries.
pub fn decode_console_entries(body: &[u8]) -> Result<Vec<ConsoleEntry>> {
    envelope::collection(parse_value(body)?)?
        .into_iter()
        .map(|entry| serde_json::from_value(entry).map_err(Into::into))
        .collect()
}

/// First allocation flagged `is_default`; empty when there is none.
fn default_allocation(entity: &Value) -> Allocation {
    envelope::relationship(entity, "allocations")
        .into_iter()
        .filter_map(|item| serde_json::from_value::<WireAllocation>(item).ok())
        .find(|alloc| alloc.is_default)
        .map(|alloc| Allocation { id: alloc.id, ip: alloc.ip, port: alloc.port })
        .unwrap_or_default()
}

fn environment(entity: &Value) -> BTreeMap<String, String> {
    envelope::relationship(entity, "variables")
        .into_iter()
        .filter_map(|item| serde_json::from_value::<WireVariable>(item).ok())
        .map(|var| (var.env_variable, var.server_value.unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn detail_body() -> Value {
        json!({
            "object": "server",
            "attributes": {
                "server_owner": true,
                "identifier": "1a2b3c4d",
                "internal_id": 12,
                "uuid": "1a2b3c4d-0000-0000-0000-000000000000",
                "name": "survival",
                "node": "node-eu-1",
                "is_node_under_maintenance": false,
                "sftp_details": {"ip": "sftp.example.net", "port": 2022},
                "description": "",
                "limits": {"memory": 4096, "swap": 0, "disk": 20480, "io": 500, "cpu": 200},
                "invocation": "java -jar server.jar",
                "docker_image": "ghcr.io/pterodactyl/yolks:java_17",
                "egg_features": null,
                "feature_limits": {"databases": 2, "allocations": 3, "backups": 5},
                "is_suspended": false,
                "is_installing": false,
                "is_transferring": false,
                "relationships": {
                    "allocations": {"object": "list", "data": [
                        {"object": "allocation", "attributes": {"id": 1, "ip": "10.0.0.1", "port": 25566, "is_default": false}},
                        {"object": "allocation", "attributes": {"id": 2, "ip": "10.0.0.1", "port": 25565, "is_default": true}},
                        {"object": "allocation", "attributes": {"id": 3, "ip": "10.0.0.2", "port": 25565, "is_default": true}}
                    ]},
                    "variables": {"object": "list", "data": [
                        {"object": "egg_variable", "attributes": {"env_variable": "SERVER_JAR", "server_value": "server.jar"}},
                        {"object": "egg_variable", "attributes": {"env_variable": "MEMORYSIZE", "server_value": null}}
                    ]}
                }
            },
            "meta": {"is_server_owner": true, "user_permissions": ["*"]}
        })
    }

    #[test]
    fn server_snapshot_selects_first_default_allocation() {
        let snapshot =
            decode_server_snapshot("1a2b3c4d", detail_body().to_string().as_bytes()).unwrap();

        assert_eq!(snapshot.id, "1a2b3c4d");
        assert_eq!(snapshot.allocation, Allocation { id: Some(2), ip: "10.0.0.1".into(), port: 25565 });
        assert_eq!(snapshot.environment.get("SERVER_JAR").map(String::as_str), Some("server.jar"));
        assert_eq!(snapshot.environment.get("MEMORYSIZE").map(String::as_str), Some(""));
        assert_eq!(snapshot.egg_features, None);
        assert_eq!(snapshot.user_permissions, Some(vec!["*".to_string()]));
        assert_eq!(snapshot.limits.io, 500);
        assert_eq!(snapshot.sftp_port, 2022);
    }

    #[test]
    fn empty_relationships_degrade_to_defaults() {
        let body = json!({"attributes": {
            "identifier": "abc", "internal_id": 1, "name": "bare",
            "relationships": {"allocations": {"data": []}}
        }})
        .to_string();

        let snapshot = decode_server_snapshot("abc", body.as_bytes()).unwrap();
        assert_eq!(snapshot.allocation, Allocation::default());
        assert!(snapshot.environment.is_empty());
        assert_eq!(snapshot.user_permissions, None);
    }

    #[test]
    fn server_snapshot_requires_identifier() {
        let body = json!({"attributes": {"internal_id": 1, "name": "x"}}).to_string();
        assert!(decode_server_snapshot("abc", body.as_bytes()).is_err());
    }

    #[test]
    fn server_list_keeps_api_order_and_container_image() {
        let body = json!({"object": "list", "data": [
            {"attributes": {"identifier": "bbb", "internal_id": 2, "name": "b",
                "container": {"image": "img:b"},
                "allocation": {"id": 9, "ip": "1.2.3.4", "port": 27015}}},
            {"attributes": {"identifier": "aaa", "internal_id": 1, "name": "a",
                "docker_image": "img:a", "suspended": true}}
        ]})
        .to_string();

        let servers = decode_server_list(body.as_bytes()).unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].identifier, "bbb");
        assert_eq!(servers[0].docker_image, "img:b");
        assert_eq!(servers[0].allocation.port, 27015);
        assert_eq!(servers[1].docker_image, "img:a");
        assert!(servers[1].is_suspended);
    }

    #[test]
    fn utilization_converts_bytes() {
        let body = json!({
            "state": "running", "memory": 2_147_483_648_i64, "cpu": 37.256,
            "disk": 1_572_864, "network": {"rx": 10, "tx": 20}, "uptime": 3600
        })
        .to_string();

        let snapshot = decode_utilization("abc", body.as_bytes()).unwrap();
        assert_eq!(snapshot.memory_mb, 2048.0);
        assert_eq!(snapshot.disk_mb, 1.5);
        assert_eq!(snapshot.cpu_percent, 37.26);
        assert_eq!(snapshot.network_tx_bytes, 20);
    }

    #[test]
    fn utilization_accepts_resources_envelope() {
        let body = json!({"object": "stats", "attributes": {
            "current_state": "starting",
            "resources": {"memory_bytes": 1_048_576, "cpu_absolute": 1.0, "disk_bytes": 0,
                "network_rx_bytes": 5, "network_tx_bytes": 6, "uptime": 12}
        }})
        .to_string();

        let snapshot = decode_utilization("abc", body.as_bytes()).unwrap();
        assert_eq!(snapshot.state, "starting");
        assert_eq!(snapshot.memory_mb, 1.0);
        assert_eq!(snapshot.network_rx_bytes, 5);
        assert_eq!(snapshot.uptime_seconds, 12);
    }

    #[test]
    fn startup_maps_fields() {
        let body = json!({
            "startup": "./start.sh", "egg": 4, "image": "img:1",
            "environment": {"SERVER_JAR": "paper.jar"}
        })
        .to_string();

        let snapshot = decode_startup("abc", body.as_bytes()).unwrap();
        assert_eq!(snapshot.startup_command, "./start.sh");
        assert_eq!(snapshot.egg_id, Some(4));
        assert_eq!(snapshot.environment.len(), 1);
    }

    #[test]
    fn console_entries_decode_from_data_envelope() {
        let body = json!({"data": [
            {"event": "console output", "args": ["hello"], "timestamp": "t1"},
            {"text": "plain"}
        ]})
        .to_string();

        let entries = decode_console_entries(body.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].args, vec!["hello"]);
        assert_eq!(entries[1].text.as_deref(), Some("plain"));
    }
}
