//! Weighted hop sequences returned by path-finding queries.

use serde::Serialize;

use crate::node::Node;

/// One hop of a path: the node reached and the edge weight paid to reach it
/// from the previous hop. The first segment's weight is 0 by definition —
/// there is no predecessor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSegment {
    pub node: Node,
    pub weight_from_previous: f64,
}

/// An ordered, non-empty sequence of hops.
///
/// Non-emptiness is enforced at construction; an empty path-finding response
/// means "no route" and never becomes a `Path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Build a path from hops. Returns `None` when `segments` is empty.
    /// The first segment's weight is normalized to 0.
    pub fn from_segments(mut segments: Vec<PathSegment>) -> Option<Self> {
        let first = segments.first_mut()?;
        first.weight_from_previous = 0.0;
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false — a `Path` is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sum of all edge weights along the path.
    pub fn total_cost(&self) -> f64 {
        self.segments.iter().map(|s| s.weight_from_previous).sum()
    }

    /// The last node of the path.
    pub fn terminal(&self) -> &Node {
        // Non-empty by construction.
        &self.segments[self.segments.len() - 1].node
    }

    /// The first node of the path.
    pub fn origin(&self) -> &Node {
        &self.segments[0].node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NetworkNumber, NodeRole};

    fn node(id: &str, nn: u32) -> Node {
        Node {
            id: id.to_owned(),
            network_number: NetworkNumber(nn),
            address: Some(format!("10.{nn}")),
            latitude: 40.7,
            longitude: -73.9,
            altitude: 30.0,
            role: NodeRole::Normal,
            active: true,
        }
    }

    fn segment(id: &str, nn: u32, weight: f64) -> PathSegment {
        PathSegment {
            node: node(id, nn),
            weight_from_previous: weight,
        }
    }

    #[test]
    fn empty_is_not_a_path() {
        assert!(Path::from_segments(vec![]).is_none());
    }

    #[test]
    fn first_weight_normalized_to_zero() {
        let path =
            Path::from_segments(vec![segment("a", 1, 5.0), segment("b", 2, 3.0)]).unwrap();
        assert_eq!(path.segments()[0].weight_from_previous, 0.0);
        assert_eq!(path.total_cost(), 3.0);
    }

    #[test]
    fn cost_length_and_terminal() {
        let path = Path::from_segments(vec![
            segment("a", 1, 0.0),
            segment("b", 2, 4.0),
            segment("c", 3, 8.0),
        ])
        .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.total_cost(), 12.0);
        assert_eq!(path.terminal().id, "c");
        assert_eq!(path.origin().id, "a");
    }
}
