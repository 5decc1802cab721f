//! meshmap-render — the rendering boundary and its state machine.
//!
//! - **geojson**: point-and-line geometry model and the pure free functions
//!   that derive it from nodes and paths
//! - **surface**: `RenderSurface`, the named layer/source table a map engine
//!   must provide, plus the in-memory `MemorySurface`
//! - **layers**: `LayerStateManager`, the sole mutator of a surface —
//!   idempotent layer lifecycle, overlay dimming, visibility toggles

pub mod geojson;
pub mod layers;
pub mod surface;

pub use geojson::{edge_features, node_feature, nodes_collection, path_features};
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use layers::{layer_ids, LayerStateManager};
pub use surface::{
    CirclePaint, CirclePalette, LayerKind, LayerSpec, LayerStyle, MemorySurface, RenderSurface,
    SurfaceError, ACTIVE_PALETTE, INACTIVE_PALETTE, LINE_COLOR, LINE_WIDTH,
};
