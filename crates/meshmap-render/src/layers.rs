//! Layer lifecycle state machine — the sole mutator of a render surface.
//!
//! Raw surfaces are strict: adding a taken id or removing an absent one is
//! an error. The manager makes the operations callers actually want
//! idempotent — `set_layer` replaces, `remove_layer` is a no-op when absent
//! — and keeps the base-layer dimming in lockstep with whether a path or
//! edge overlay is currently displayed.

use tracing::debug;

use meshmap_core::{Node, NodeRegistry, Path};

use crate::geojson::{edge_features, nodes_collection, path_features, FeatureCollection};
use crate::surface::{
    LayerKind, LayerSpec, LayerStyle, RenderSurface, SurfaceError, ACTIVE_PALETTE,
    INACTIVE_PALETTE, LINE_COLOR, LINE_WIDTH,
};

/// Names of the drawable overlays, shared with the rendering surface.
pub mod layer_ids {
    pub const ACTIVE_NODES: &str = "active_nodes";
    pub const INACTIVE_NODES: &str = "inactive_nodes";
    pub const HIGHLIGHT_NODES: &str = "highlight_nodes";
    pub const PATH_NODES: &str = "path_nodes";
    pub const PATH: &str = "path";
    pub const EDGES_OF_NODE: &str = "edges_of_node";
}

/// Base-layer opacity while an overlay is displayed.
const DIMMED_OPACITY: f64 = 0.3;
/// Base-layer opacity with no overlay displayed.
const FULL_OPACITY: f64 = 1.0;

/// Idempotent lifecycle for the named overlays on one render surface.
pub struct LayerStateManager<S: RenderSurface> {
    surface: S,
    show_active: bool,
    show_inactive: bool,
}

impl<S: RenderSurface> LayerStateManager<S> {
    /// Active nodes start visible, inactive hidden.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            show_active: true,
            show_inactive: false,
        }
    }

    /// Read-only view of the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn active_nodes_shown(&self) -> bool {
        self.show_active
    }

    pub fn inactive_nodes_shown(&self) -> bool {
        self.show_inactive
    }

    /// Replace-or-create a layer and its backing source.
    ///
    /// If the id is taken, the existing layer is removed (layer before its
    /// source) first, so repeated calls never trip the surface's duplicate
    /// checks and always leave exactly one layer per id.
    pub fn set_layer(
        &mut self,
        id: &str,
        data: FeatureCollection,
        kind: LayerKind,
        style: LayerStyle,
    ) -> Result<(), SurfaceError> {
        if self.surface.has_layer(id) {
            self.surface.remove_layer(id)?;
            self.surface.remove_source(id)?;
        }
        self.surface.add_source(id, data)?;
        self.surface.add_layer(LayerSpec {
            id: id.to_owned(),
            source: id.to_owned(),
            kind,
            style,
        })
    }

    /// Remove a layer and its source; a no-op when absent.
    pub fn remove_layer(&mut self, id: &str) -> Result<(), SurfaceError> {
        if self.surface.has_layer(id) {
            self.surface.remove_layer(id)?;
        }
        if self.surface.has_source(id) {
            self.surface.remove_source(id)?;
        }
        Ok(())
    }

    /// Dim or restore the full node layer; a no-op while it is toggled off.
    pub fn set_base_opacity(&mut self, opacity: f64) -> Result<(), SurfaceError> {
        if self.surface.has_layer(layer_ids::ACTIVE_NODES) {
            self.surface
                .set_paint_opacity(layer_ids::ACTIVE_NODES, opacity)?;
        }
        Ok(())
    }

    /// Whether a path or edge overlay is currently displayed.
    pub fn overlay_shown(&self) -> bool {
        self.surface.has_layer(layer_ids::PATH)
            || self.surface.has_layer(layer_ids::EDGES_OF_NODE)
    }

    fn base_opacity(&self) -> f64 {
        if self.overlay_shown() {
            DIMMED_OPACITY
        } else {
            FULL_OPACITY
        }
    }

    /// Re-sync base dimming with overlay presence. Two states, tied 1:1 to
    /// "is an overlay currently displayed".
    fn sync_base_opacity(&mut self) -> Result<(), SurfaceError> {
        self.set_base_opacity(self.base_opacity())
    }

    /// Draw (or redraw) the node layers that are toggled visible from the
    /// current registry snapshot.
    pub fn render_nodes(&mut self, registry: &NodeRegistry) -> Result<(), SurfaceError> {
        if self.show_active {
            self.set_layer(
                layer_ids::ACTIVE_NODES,
                nodes_collection(registry.active()),
                LayerKind::Circle,
                LayerStyle::Circle {
                    palette: ACTIVE_PALETTE,
                    opacity: self.base_opacity(),
                },
            )?;
        } else {
            self.remove_layer(layer_ids::ACTIVE_NODES)?;
        }
        if self.show_inactive {
            self.set_layer(
                layer_ids::INACTIVE_NODES,
                nodes_collection(registry.inactive()),
                LayerKind::Circle,
                LayerStyle::Circle {
                    palette: INACTIVE_PALETTE,
                    opacity: FULL_OPACITY,
                },
            )?;
        } else {
            self.remove_layer(layer_ids::INACTIVE_NODES)?;
        }
        Ok(())
    }

    /// Show the path overlay: the line layer, its highlighted hop nodes,
    /// and base dimming. Replaces any previous path overlay.
    pub fn show_path_overlay(&mut self, path: &Path) -> Result<(), SurfaceError> {
        let hops: Vec<Node> = path.segments().iter().map(|s| s.node.clone()).collect();
        self.set_layer(
            layer_ids::PATH,
            path_features(path),
            LayerKind::Line,
            LayerStyle::Line {
                color: LINE_COLOR,
                width: LINE_WIDTH,
            },
        )?;
        self.set_layer(
            layer_ids::PATH_NODES,
            nodes_collection(&hops),
            LayerKind::Circle,
            LayerStyle::Circle {
                palette: ACTIVE_PALETTE,
                opacity: FULL_OPACITY,
            },
        )?;
        debug!(hops = path.len(), "path overlay shown");
        self.sync_base_opacity()
    }

    /// Clear the path overlay and restore base opacity if no other overlay
    /// remains.
    pub fn clear_path_overlay(&mut self) -> Result<(), SurfaceError> {
        self.remove_layer(layer_ids::PATH_NODES)?;
        self.remove_layer(layer_ids::PATH)?;
        self.sync_base_opacity()
    }

    /// Show the edges overlay: one line per known neighbor, the probed node
    /// and its neighbors highlighted, and base dimming.
    pub fn show_edges_overlay(
        &mut self,
        origin: &Node,
        neighbors: &[(Node, f64)],
    ) -> Result<(), SurfaceError> {
        let mut highlight = vec![origin.clone()];
        highlight.extend(neighbors.iter().map(|(n, _)| n.clone()));
        self.set_layer(
            layer_ids::EDGES_OF_NODE,
            edge_features(origin, neighbors),
            LayerKind::Line,
            LayerStyle::Line {
                color: LINE_COLOR,
                width: LINE_WIDTH,
            },
        )?;
        self.set_layer(
            layer_ids::HIGHLIGHT_NODES,
            nodes_collection(&highlight),
            LayerKind::Circle,
            LayerStyle::Circle {
                palette: ACTIVE_PALETTE,
                opacity: FULL_OPACITY,
            },
        )?;
        debug!(origin = %origin.id, edges = neighbors.len(), "edges overlay shown");
        self.sync_base_opacity()
    }

    /// Clear the edges overlay and restore base opacity if no other overlay
    /// remains.
    pub fn clear_edges_overlay(&mut self) -> Result<(), SurfaceError> {
        self.remove_layer(layer_ids::HIGHLIGHT_NODES)?;
        self.remove_layer(layer_ids::EDGES_OF_NODE)?;
        self.sync_base_opacity()
    }

    /// Flip active-node visibility. Off removes the layer entirely; on
    /// re-adds it from the given registry snapshot. Returns the new state.
    pub fn toggle_active_nodes(
        &mut self,
        registry: &NodeRegistry,
    ) -> Result<bool, SurfaceError> {
        self.show_active = !self.show_active;
        self.render_nodes(registry)?;
        Ok(self.show_active)
    }

    /// Flip inactive-node visibility, independently of the active toggle.
    pub fn toggle_inactive_nodes(
        &mut self,
        registry: &NodeRegistry,
    ) -> Result<bool, SurfaceError> {
        self.show_inactive = !self.show_inactive;
        self.render_nodes(registry)?;
        Ok(self.show_inactive)
    }
}
