//! Point-and-line geometry model, GeoJSON-shaped.
//!
//! Features are derived from nodes and paths by pure free functions — node
//! records are immutable value data and carry no rendering behavior of
//! their own.

use serde::Serialize;
use serde_json::json;

use meshmap_core::{Node, Path};

/// A feature's geometry: one point or one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        /// `[lng, lat, alt]`.
        coordinates: [f64; 3],
    },
    LineString {
        coordinates: Vec<[f64; 3]>,
    },
}

/// One drawable feature with open-ended properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub properties: serde_json::Value,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(properties: serde_json::Value, geometry: Geometry) -> Self {
        Self {
            kind: "Feature",
            properties,
            geometry,
        }
    }
}

/// The backing data of one named source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn coordinates(node: &Node) -> [f64; 3] {
    [node.longitude, node.latitude, node.altitude]
}

/// A node as a point feature carrying its identity and role.
pub fn node_feature(node: &Node) -> Feature {
    Feature::new(
        json!({
            "id": node.id,
            "nn": node.network_number,
            "node_type": node.role.as_wire(),
        }),
        Geometry::Point {
            coordinates: coordinates(node),
        },
    )
}

/// A set of nodes as one point collection.
pub fn nodes_collection(nodes: &[Node]) -> FeatureCollection {
    FeatureCollection::new(nodes.iter().map(node_feature).collect())
}

/// A path as one line feature per consecutive hop pair, each carrying the
/// weight of the edge it draws.
pub fn path_features(path: &Path) -> FeatureCollection {
    let segments = path.segments();
    let features = segments
        .windows(2)
        .map(|pair| {
            Feature::new(
                json!({ "weight": pair[1].weight_from_previous }),
                Geometry::LineString {
                    coordinates: vec![coordinates(&pair[0].node), coordinates(&pair[1].node)],
                },
            )
        })
        .collect();
    FeatureCollection::new(features)
}

/// Direct edges from an origin node to each known neighbor, weight = cost.
pub fn edge_features(origin: &Node, neighbors: &[(Node, f64)]) -> FeatureCollection {
    let features = neighbors
        .iter()
        .map(|(neighbor, cost)| {
            Feature::new(
                json!({ "weight": cost }),
                Geometry::LineString {
                    coordinates: vec![coordinates(origin), coordinates(neighbor)],
                },
            )
        })
        .collect();
    FeatureCollection::new(features)
}
