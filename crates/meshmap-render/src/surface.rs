//! The rendering boundary: a named layer/source table over point-and-line
//! geometry.
//!
//! A real map engine binds this trait; tests and headless runs use
//! [`MemorySurface`]. Either way the table is strict about identifiers —
//! duplicate adds and removals of absent entries are errors, exactly the
//! hazards the layer state machine exists to absorb. Only
//! [`crate::layers::LayerStateManager`] may mutate a surface.

use std::collections::HashMap;

use crate::geojson::FeatureCollection;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("duplicate layer id: {0}")]
    DuplicateLayer(String),

    #[error("duplicate source id: {0}")]
    DuplicateSource(String),

    #[error("no such layer: {0}")]
    UnknownLayer(String),

    #[error("no such source: {0}")]
    UnknownSource(String),

    #[error("layer {layer} references missing source {missing}")]
    MissingSource { layer: String, missing: String },
}

/// How a layer draws its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Circle,
    Line,
}

/// Per-role circle paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePaint {
    pub radius: f64,
    pub color: &'static str,
}

/// Circle paint per node role, resolved against each feature's `node_type`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePalette {
    pub gateway: CirclePaint,
    pub hub: CirclePaint,
    pub normal: CirclePaint,
}

/// Paint for the active-node layers and highlight layers.
pub const ACTIVE_PALETTE: CirclePalette = CirclePalette {
    gateway: CirclePaint { radius: 12.0, color: "#006eff" },
    hub: CirclePaint { radius: 9.0, color: "#50c1f9" },
    normal: CirclePaint { radius: 7.0, color: "#ff274b" },
};

/// Inactive nodes keep role-sized circles but a uniform gray.
pub const INACTIVE_PALETTE: CirclePalette = CirclePalette {
    gateway: CirclePaint { radius: 12.0, color: "#646464" },
    hub: CirclePaint { radius: 9.0, color: "#646464" },
    normal: CirclePaint { radius: 7.0, color: "#646464" },
};

pub const LINE_COLOR: &str = "#006eff";
pub const LINE_WIDTH: f64 = 5.0;

/// Style of one layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerStyle {
    Circle {
        palette: CirclePalette,
        opacity: f64,
    },
    Line {
        color: &'static str,
        width: f64,
    },
}

/// One named layer bound to a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub kind: LayerKind,
    pub style: LayerStyle,
}

/// The capability a map engine must provide: named geometry sources, named
/// layers drawing them, and per-layer paint opacity.
pub trait RenderSurface {
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError>;
    fn remove_source(&mut self, id: &str) -> Result<(), SurfaceError>;
    fn has_source(&self, id: &str) -> bool;

    fn add_layer(&mut self, spec: LayerSpec) -> Result<(), SurfaceError>;
    fn remove_layer(&mut self, id: &str) -> Result<(), SurfaceError>;
    fn has_layer(&self, id: &str) -> bool;

    /// Adjust a circle layer's paint opacity in place.
    fn set_paint_opacity(&mut self, layer_id: &str, opacity: f64) -> Result<(), SurfaceError>;
}

/// In-memory `RenderSurface` — the substrate for tests and headless runs.
///
/// Mirrors a real engine's strictness so idempotency violations surface as
/// errors instead of silently passing.
#[derive(Debug, Default)]
pub struct MemorySurface {
    sources: HashMap<String, FeatureCollection>,
    layers: HashMap<String, LayerSpec>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The geometry currently backing a source, if present.
    pub fn source(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    /// The layer bound to an id, if present.
    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.get(id)
    }

    /// A circle layer's current paint opacity, if present.
    pub fn layer_opacity(&self, id: &str) -> Option<f64> {
        match self.layers.get(id)?.style {
            LayerStyle::Circle { opacity, .. } => Some(opacity),
            LayerStyle::Line { .. } => None,
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl RenderSurface for MemorySurface {
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), SurfaceError> {
        if self.sources.contains_key(id) {
            return Err(SurfaceError::DuplicateSource(id.to_owned()));
        }
        self.sources.insert(id.to_owned(), data);
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> Result<(), SurfaceError> {
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SurfaceError::UnknownSource(id.to_owned()))
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_layer(&mut self, spec: LayerSpec) -> Result<(), SurfaceError> {
        if self.layers.contains_key(&spec.id) {
            return Err(SurfaceError::DuplicateLayer(spec.id));
        }
        if !self.sources.contains_key(&spec.source) {
            return Err(SurfaceError::MissingSource {
                layer: spec.id,
                missing: spec.source,
            });
        }
        self.layers.insert(spec.id.clone(), spec);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), SurfaceError> {
        self.layers
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SurfaceError::UnknownLayer(id.to_owned()))
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.contains_key(id)
    }

    fn set_paint_opacity(&mut self, layer_id: &str, opacity: f64) -> Result<(), SurfaceError> {
        let spec = self
            .layers
            .get_mut(layer_id)
            .ok_or_else(|| SurfaceError::UnknownLayer(layer_id.to_owned()))?;
        if let LayerStyle::Circle { opacity: o, .. } = &mut spec.style {
            *o = opacity;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::FeatureCollection;

    fn circle_spec(id: &str) -> LayerSpec {
        LayerSpec {
            id: id.to_owned(),
            source: id.to_owned(),
            kind: LayerKind::Circle,
            style: LayerStyle::Circle {
                palette: ACTIVE_PALETTE,
                opacity: 1.0,
            },
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut surface = MemorySurface::new();
        surface
            .add_source("nodes", FeatureCollection::new(vec![]))
            .unwrap();
        surface.add_layer(circle_spec("nodes")).unwrap();

        assert_eq!(
            surface.add_source("nodes", FeatureCollection::new(vec![])),
            Err(SurfaceError::DuplicateSource("nodes".into()))
        );
        assert_eq!(
            surface.add_layer(circle_spec("nodes")),
            Err(SurfaceError::DuplicateLayer("nodes".into()))
        );
    }

    #[test]
    fn layer_requires_its_source() {
        let mut surface = MemorySurface::new();
        assert!(matches!(
            surface.add_layer(circle_spec("orphan")),
            Err(SurfaceError::MissingSource { .. })
        ));
    }

    #[test]
    fn removing_absent_entries_is_an_error() {
        let mut surface = MemorySurface::new();
        assert_eq!(
            surface.remove_layer("ghost"),
            Err(SurfaceError::UnknownLayer("ghost".into()))
        );
        assert_eq!(
            surface.remove_source("ghost"),
            Err(SurfaceError::UnknownSource("ghost".into()))
        );
    }

    #[test]
    fn opacity_updates_in_place() {
        let mut surface = MemorySurface::new();
        surface
            .add_source("nodes", FeatureCollection::new(vec![]))
            .unwrap();
        surface.add_layer(circle_spec("nodes")).unwrap();
        surface.set_paint_opacity("nodes", 0.3).unwrap();
        assert_eq!(surface.layer_opacity("nodes"), Some(0.3));
    }
}
