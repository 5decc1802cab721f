//! Great-circle distance, used as the final path-ranking tie-break.

use crate::node::Node;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two latitude/longitude points, in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Haversine distance between two nodes, in kilometers.
pub fn distance_km(a: &Node, b: &Node) -> f64 {
    haversine_km(a.latitude, a.longitude, b.latitude, b.longitude)
}
