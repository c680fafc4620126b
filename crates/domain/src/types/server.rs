//! Managed record for the server resource

use serde::{Deserialize, Serialize};

/// Local view of a server managed through the administrative API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Numeric internal ID, assigned by the API on creation
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub user_id: i64,
    pub egg_id: i64,
    pub location_id: i64,
    pub node_id: i64,
    pub memory: i64,
    pub disk: i64,
    pub cpu: i64,
    pub docker_image: String,
    pub startup_command: String,
}

impl ServerRecord {
    /// Carry the identity of `prior` onto this record.
    ///
    /// The identity never changes once assigned, so desired records coming
    /// from the host (which may not repeat it) inherit the known one.
    #[must_use]
    pub fn with_identity_of(mut self, prior: &Self) -> Self {
        if prior.id.is_some() {
            self.id = prior.id;
        }
        self
    }
}
