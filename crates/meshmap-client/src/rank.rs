//! Multi-candidate path ranking — "find the best route to any gateway".
//!
//! Total order over candidates, smaller is better, applied in sequence:
//! failed or empty candidates last; then total cost ascending; then segment
//! count ascending; then great-circle distance from the origin to the
//! candidate's terminal node ascending. Ties after all four leave the first
//! candidate selected.

use std::cmp::Ordering;

use meshmap_core::{geo, Node, Path};

use crate::error::ClientError;

/// Order two successful candidates under the cost → length → distance
/// criteria.
pub fn compare_paths(origin: &Node, a: &Path, b: &Path) -> Ordering {
    a.total_cost()
        .total_cmp(&b.total_cost())
        .then_with(|| a.len().cmp(&b.len()))
        .then_with(|| {
            let to_a = geo::distance_km(origin, a.terminal());
            let to_b = geo::distance_km(origin, b.terminal());
            to_a.total_cmp(&to_b)
        })
}

/// Select the best candidate path, `None` entries (failed or empty
/// responses) ranking behind every successful one.
///
/// Fails with `NoGatewayRoute` when no candidate succeeded.
pub fn rank(origin: &Node, candidates: Vec<Option<Path>>) -> Result<Path, ClientError> {
    candidates
        .into_iter()
        .flatten()
        .min_by(|a, b| compare_paths(origin, a, b))
        .ok_or_else(|| ClientError::NoGatewayRoute {
            origin_id: origin.id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshmap_core::{NetworkNumber, NodeRole, PathSegment};

    fn node_at(id: &str, nn: u32, lat: f64, lng: f64) -> Node {
        Node {
            id: id.to_owned(),
            network_number: NetworkNumber(nn),
            address: Some(format!("10.{nn}")),
            latitude: lat,
            longitude: lng,
            altitude: 30.0,
            role: NodeRole::Normal,
            active: true,
        }
    }

    fn origin() -> Node {
        node_at("origin", 1, 40.7051, -73.9332)
    }

    /// A path of `hops` segments costing `cost` in total, ending at `end`.
    fn path_to(end: Node, cost: f64, hops: usize) -> Path {
        assert!(hops >= 2);
        let mut segments = vec![PathSegment {
            node: origin(),
            weight_from_previous: 0.0,
        }];
        for i in 1..hops - 1 {
            segments.push(PathSegment {
                node: node_at(&format!("mid{i}"), 1000 + i as u32, 40.71, -73.94),
                weight_from_previous: 0.0,
            });
        }
        segments.push(PathSegment {
            node: end,
            weight_from_previous: cost,
        });
        Path::from_segments(segments).unwrap()
    }

    fn gateway(nn: u32, lat: f64, lng: f64) -> Node {
        node_at(&format!("gw{nn}"), nn, lat, lng)
    }

    #[test]
    fn cheaper_wins_regardless_of_length() {
        let costly_short = path_to(gateway(713, 40.75, -73.95), 10.0, 2);
        let cheap_long = path_to(gateway(227, 40.60, -73.80), 7.0, 5);
        let best = rank(&origin(), vec![Some(costly_short), Some(cheap_long)]).unwrap();
        assert_eq!(best.terminal().network_number, NetworkNumber(227));
    }

    #[test]
    fn equal_cost_prefers_fewer_hops() {
        let short = path_to(gateway(713, 40.75, -73.95), 12.0, 3);
        let long = path_to(gateway(227, 40.60, -73.80), 12.0, 5);
        let best = rank(&origin(), vec![Some(long), Some(short)]).unwrap();
        assert_eq!(best.terminal().network_number, NetworkNumber(713));
    }

    #[test]
    fn equal_cost_and_length_prefers_nearer_terminal() {
        // Same cost and hop count; 713 terminates ~1.5 km away, 227 ~20 km.
        let near = path_to(gateway(713, 40.7151, -73.9432), 9.0, 3);
        let far = path_to(gateway(227, 40.55, -74.10), 9.0, 3);
        let best = rank(&origin(), vec![Some(far), Some(near)]).unwrap();
        assert_eq!(best.terminal().network_number, NetworkNumber(713));
    }

    #[test]
    fn failed_candidates_rank_last() {
        let only = path_to(gateway(713, 40.75, -73.95), 30.0, 4);
        let best = rank(&origin(), vec![None, Some(only), None]).unwrap();
        assert_eq!(best.terminal().network_number, NetworkNumber(713));
    }

    #[test]
    fn all_failed_is_no_gateway_route() {
        let err = rank(&origin(), vec![None, None, None]).unwrap_err();
        match err {
            ClientError::NoGatewayRoute { origin_id } => assert_eq!(origin_id, "origin"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
