// Container list entries and inspect details

use serde::{Deserialize, Serialize};

/// A live container as reported by the list call. Only `id` takes part in reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

impl ContainerSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
        }
    }
}

/// Bare id; the id doubles as the display name.
impl From<&str> for ContainerSummary {
    fn from(id: &str) -> Self {
        Self::new(id, id)
    }
}

/// Inspect output shown in the details panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDetails {
    pub name: String,
    pub image: String,
    pub path: String,
    pub args: Vec<String>,
    pub ip_address: String,
    /// `"80/tcp -> 0.0.0.0:8080"`, sorted by container port.
    pub ports: Vec<String>,
    /// `"/data -> /var/lib/docker/volumes/x/_data"`, sorted by destination.
    pub volumes: Vec<String>,
    pub hostname: String,
    pub memory: i64,
    pub memory_swap: i64,
    pub cpu_shares: i64,
    pub cpuset: String,
    pub env: Vec<String>,
}
