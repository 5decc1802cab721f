//! Indexed, role-ordered snapshot of a topology fetch.
//!
//! Loading is pure and total: a raw record missing its identifiers or
//! geometry is dropped with a warning and the rest of the snapshot loads.
//! A refresh replaces the whole registry; nothing is mutated in place.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::codec;
use crate::node::{NetworkNumber, Node, NodeRole, RawNode};

/// Indexed node snapshot.
///
/// Active nodes are stored normal → hub → gateway so higher-priority roles
/// draw last (visually on top) when rendered as a single layer. Lookups
/// cover active nodes only — an inactive node has no address and is not
/// eligible for path-finding.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    active: Vec<Node>,
    inactive: Vec<Node>,
    by_id: HashMap<String, usize>,
    by_nn: HashMap<NetworkNumber, usize>,
}

impl NodeRegistry {
    /// An empty registry, the display state after a failed fetch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from raw `fetch_nodes` records.
    ///
    /// Records missing id, network number, or geometry are dropped, as are
    /// records whose id or network number was already taken (first record
    /// wins). Partial success: one bad record never fails the snapshot.
    pub fn load(raw: Vec<RawNode>) -> Self {
        let total = raw.len();
        let mut normal = Vec::new();
        let mut hubs = Vec::new();
        let mut gateways = Vec::new();
        let mut inactive = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut seen_nns: HashSet<NetworkNumber> = HashSet::new();
        let mut dropped = 0usize;

        for record in raw {
            let Some(node) = materialize(record) else {
                dropped += 1;
                continue;
            };
            if seen_ids.contains(&node.id) {
                warn!(id = %node.id, "duplicate node id, keeping first");
                dropped += 1;
                continue;
            }
            if seen_nns.contains(&node.network_number) {
                warn!(nn = %node.network_number, "duplicate network number, keeping first");
                dropped += 1;
                continue;
            }
            seen_ids.insert(node.id.clone());
            seen_nns.insert(node.network_number);

            if !node.active {
                inactive.push(node);
            } else {
                match node.role {
                    NodeRole::Normal => normal.push(node),
                    NodeRole::Hub => hubs.push(node),
                    NodeRole::Gateway => gateways.push(node),
                }
            }
        }

        let mut active = normal;
        active.append(&mut hubs);
        active.append(&mut gateways);

        let by_id = active
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        let by_nn = active
            .iter()
            .enumerate()
            .map(|(i, n)| (n.network_number, i))
            .collect();

        debug!(
            total,
            active = active.len(),
            inactive = inactive.len(),
            dropped,
            "registry loaded"
        );

        Self {
            active,
            inactive,
            by_id,
            by_nn,
        }
    }

    /// Look up an active node by its display id.
    pub fn by_id(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id).map(|&i| &self.active[i])
    }

    /// Look up an active node by its network number.
    pub fn by_network_number(&self, nn: NetworkNumber) -> Option<&Node> {
        self.by_nn.get(&nn).map(|&i| &self.active[i])
    }

    /// Active nodes, normal → hub → gateway.
    pub fn active(&self) -> &[Node] {
        &self.active
    }

    /// Inactive nodes (no known address at fetch time).
    pub fn inactive(&self) -> &[Node] {
        &self.inactive
    }

    /// Total nodes in the snapshot, active and inactive.
    pub fn len(&self) -> usize {
        self.active.len() + self.inactive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.inactive.is_empty()
    }

    /// Active nodes with the given role.
    pub fn count_by_role(&self, role: NodeRole) -> usize {
        self.active.iter().filter(|n| n.role == role).count()
    }
}

/// Turn one raw record into a node, or drop it.
fn materialize(raw: RawNode) -> Option<Node> {
    let id = match raw.id {
        Some(id) if !id.is_empty() => id,
        _ => {
            warn!("dropping node record without id");
            return None;
        }
    };
    let Some(nn) = raw.nn else {
        warn!(id = %id, "dropping node record without network number");
        return None;
    };
    let (Some(lat), Some(lng)) = (raw.lat, raw.lng) else {
        warn!(id = %id, "dropping node record without coordinates");
        return None;
    };

    // Active means the record carried connectivity information at fetch
    // time; the explicit wire flag wins when the service sends one.
    let active = raw.active.unwrap_or(raw.address.is_some());

    // An active node's dotted address is derivable from its network number
    // when the wire omits it. Inactive nodes have no known address.
    let address = match raw.address {
        Some(address) => Some(address),
        None if active => codec::decode(nn).ok(),
        None => None,
    };

    Some(Node {
        id,
        network_number: nn,
        address,
        latitude: lat,
        longitude: lng,
        altitude: raw.alt.unwrap_or(0.0),
        role: raw.role.unwrap_or(NodeRole::Normal),
        active,
    })
}
