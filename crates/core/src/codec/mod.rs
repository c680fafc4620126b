//! Entity codecs
//!
//! Bidirectional mapping between the API's enveloped JSON and the typed
//! records and snapshots. Encoding is per operation: every payload carries
//! only the fields its endpoint accepts.

pub mod actions;
pub mod envelope;
pub mod queries;
pub mod server;
pub mod units;

use kineticpanel_domain::{PanelError, Result};
use serde_json::Value;

pub use actions::{
    encode_command, encode_docker_image, encode_power, encode_reinstall, encode_rename,
    encode_startup_variable,
};
pub use queries::{
    decode_console_entries, decode_server_list, decode_server_snapshot, decode_startup,
    decode_utilization,
};
pub use server::{decode_server, encode_server};

/// Parse a response body as JSON.
///
/// # Errors
/// Returns `PanelError::Decode` for an empty or malformed body.
pub(crate) fn parse_value(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PanelError::Decode("empty response body".into()));
    }
    Ok(serde_json::from_slice(body)?)
}
