//! Node records and their wire shape.
//!
//! Nodes are immutable value data: a topology refresh replaces the whole
//! registry, nothing is patched in place. Anything derived from a node
//! (GeoJSON features, coordinates, distances) lives in free functions, not
//! per-instance behavior.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

/// Compact numeric routing identifier, distinct from the display id.
///
/// Rendered in decimal wherever it crosses a wire (query strings, JSON).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NetworkNumber(pub u32);

impl fmt::Display for NetworkNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NetworkNumber {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(NetworkNumber)
            .map_err(|_| CodecError::InvalidIdentifier(s.to_owned()))
    }
}

impl From<u32> for NetworkNumber {
    fn from(nn: u32) -> Self {
        NetworkNumber(nn)
    }
}

/// Node role, ascending render priority: higher-priority roles draw last so
/// they end up visually on top when painted as a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    #[serde(rename = "hub")]
    Hub,
    #[serde(rename = "supernode")]
    Gateway,
    /// Also the fallback for role strings this client does not know.
    #[serde(rename = "node", other)]
    Normal,
}

impl NodeRole {
    /// Wire and feature-property name (`"node"` / `"hub"` / `"supernode"`).
    pub fn as_wire(&self) -> &'static str {
        match self {
            NodeRole::Normal => "node",
            NodeRole::Hub => "hub",
            NodeRole::Gateway => "supernode",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One node in a topology snapshot.
///
/// `id` and `network_number` are each unique within a registry. A node is
/// active when it carried connectivity information (a resolvable address) at
/// fetch time; inactive nodes are excluded from path-finding-eligible sets
/// but remain displayable on their own overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub network_number: NetworkNumber,
    /// Dotted address form, derivable from `network_number` via the codec.
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub role: NodeRole,
    pub active: bool,
}

/// Wire shape of one `fetch_nodes` entry.
///
/// Every field is optional on purpose: one malformed record is dropped at
/// load time and the rest of the snapshot still loads.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nn: Option<NetworkNumber>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub alt: Option<f64>,
    #[serde(rename = "type", default)]
    pub role: Option<NodeRole>,
    #[serde(default)]
    pub active: Option<bool>,
}
