//! Path-finding request construction.

use indexmap::IndexSet;

use meshmap_core::{NetworkNumber, Node};

/// Nodes excluded from path-finding for the current query.
///
/// Membership is by node identity (its network number). Iteration order is
/// insertion order, which is also the serialization order on the wire.
#[derive(Debug, Clone, Default)]
pub struct DisabledNodes {
    set: IndexSet<NetworkNumber>,
}

impl DisabledNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a node in or out of the set. Returns true when the node is
    /// disabled afterwards.
    pub fn toggle(&mut self, node: &Node) -> bool {
        let nn = node.network_number;
        if self.set.shift_remove(&nn) {
            false
        } else {
            self.set.insert(nn);
            true
        }
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.set.contains(&node.network_number)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Network numbers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NetworkNumber> + '_ {
        self.set.iter().copied()
    }
}

/// One path-finding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    start: NetworkNumber,
    end: NetworkNumber,
    disabled: Vec<NetworkNumber>,
}

impl PathQuery {
    pub fn new(start: &Node, end: &Node) -> Self {
        Self::between(start.network_number, end.network_number)
    }

    pub fn between(start: NetworkNumber, end: NetworkNumber) -> Self {
        Self {
            start,
            end,
            disabled: Vec::new(),
        }
    }

    /// Snapshot the disabled set, preserving its insertion order.
    pub fn with_disabled(mut self, disabled: &DisabledNodes) -> Self {
        self.disabled = disabled.iter().collect();
        self
    }

    pub fn start(&self) -> NetworkNumber {
        self.start
    }

    pub fn end(&self) -> NetworkNumber {
        self.end
    }

    /// The request path and query string.
    ///
    /// The `disabled_node` parameter is omitted entirely when the set is
    /// empty — the service treats an empty value differently from absence.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("path_finding?node1={}&node2={}", self.start, self.end);
        if !self.disabled.is_empty() {
            let csv = self
                .disabled
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            query.push_str("&disabled_node=");
            query.push_str(&csv);
        }
        query
    }
}
