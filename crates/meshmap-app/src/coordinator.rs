//! Interaction coordinator — UI events in, registry/layer mutations out.

use tracing::{debug, info};

use meshmap_client::{
    ClientError, DisabledNodes, EdgeProbe, EdgeReport, SearchMode, TopologyClient,
};
use meshmap_core::{codec, Node, NodeRegistry, Path};
use meshmap_render::{LayerStateManager, RenderSurface, SurfaceError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("select both a start and an end node before plotting a path")]
    EndpointsNotSelected,
}

/// Content of the single focused overlay (the node popup). Explicit state —
/// there is exactly one, owned here, never a global.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayContent {
    NodeDetails {
        node: Node,
        /// False while the node is in the disabled set.
        routing_enabled: bool,
    },
}

/// Session-scoped UI state. Cleared explicitly by the user or implicitly
/// when a newer query invalidates it.
#[derive(Debug, Default)]
pub struct Session {
    pub start: Option<Node>,
    pub end: Option<Node>,
    pub disabled: DisabledNodes,
    pub path: Option<Path>,
    pub edges_origin: Option<Node>,
    pub edges: Vec<EdgeReport>,
    pub overlay: Option<OverlayContent>,
}

/// Ties UI events to the registry, the topology client, and the layer
/// state machine.
pub struct Coordinator<S: RenderSurface> {
    client: TopologyClient,
    registry: NodeRegistry,
    layers: LayerStateManager<S>,
    session: Session,
    /// Monotonically increasing request generation. A response whose
    /// captured generation is no longer current is discarded, never applied.
    generation: u64,
}

impl<S: RenderSurface> Coordinator<S> {
    pub fn new(client: TopologyClient, surface: S) -> Self {
        Self {
            client,
            registry: NodeRegistry::empty(),
            layers: LayerStateManager::new(surface),
            session: Session::default(),
            generation: 0,
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn layers(&self) -> &LayerStateManager<S> {
        &self.layers
    }

    /// Start a new query: bump and capture the generation counter. Any
    /// response captured under an older generation becomes stale.
    pub fn begin_query(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Apply a resolved path if its generation is still current. Returns
    /// whether it was applied.
    pub fn apply_path(&mut self, generation: u64, path: Path) -> Result<bool, AppError> {
        if !self.is_current(generation) {
            debug!(generation, current = self.generation, "discarding stale path response");
            return Ok(false);
        }
        self.layers.show_path_overlay(&path)?;
        self.session.path = Some(path);
        Ok(true)
    }

    /// Fetch the topology and rebuild the registry and node layers.
    /// On failure the display resets to empty; the error surfaces to the
    /// user and the fetch must be retried manually.
    pub async fn refresh_topology(&mut self) -> Result<(), AppError> {
        let generation = self.begin_query();
        let result = self.client.fetch_registry().await;
        if !self.is_current(generation) {
            debug!(generation, "discarding stale topology response");
            return Ok(());
        }
        match result {
            Ok(registry) => {
                self.registry = registry;
                self.layers.render_nodes(&self.registry)?;
                info!(
                    active = self.registry.active().len(),
                    inactive = self.registry.inactive().len(),
                    "topology refreshed"
                );
                Ok(())
            }
            Err(e) => {
                self.registry = NodeRegistry::empty();
                self.layers.render_nodes(&self.registry)?;
                Err(e.into())
            }
        }
    }

    /// Look up a node by id or network number and focus it. A miss names
    /// the search key and mode. Network-number search also accepts the
    /// dotted address form, translated through the codec — malformed dotted
    /// input is an `InvalidIdentifier` error, not a silent miss.
    pub fn search(&mut self, mode: SearchMode, key: &str) -> Result<Node, AppError> {
        let found = match mode {
            SearchMode::Id => self.registry.by_id(key),
            SearchMode::NetworkNumber if key.contains('.') => {
                let nn = codec::encode(key).map_err(ClientError::from)?;
                self.registry.by_network_number(nn)
            }
            SearchMode::NetworkNumber => key
                .parse()
                .ok()
                .and_then(|nn| self.registry.by_network_number(nn)),
        };
        let node = found.cloned().ok_or_else(|| ClientError::LookupMiss {
            key: key.to_owned(),
            mode,
        })?;
        self.focus(node.clone());
        Ok(node)
    }

    /// Focus a node: its details become the single current overlay.
    pub fn focus(&mut self, node: Node) {
        let routing_enabled = !self.session.disabled.contains(&node);
        self.session.overlay = Some(OverlayContent::NodeDetails {
            node,
            routing_enabled,
        });
    }

    pub fn clear_focus(&mut self) {
        self.session.overlay = None;
    }

    pub fn select_start(&mut self, id: &str) -> Result<(), AppError> {
        self.session.start = Some(self.lookup_id(id)?);
        Ok(())
    }

    pub fn select_end(&mut self, id: &str) -> Result<(), AppError> {
        self.session.end = Some(self.lookup_id(id)?);
        Ok(())
    }

    /// Flip a node in or out of the disabled set without removing it from
    /// the registry. Returns true when the node is disabled afterwards.
    pub fn toggle_disabled(&mut self, id: &str) -> Result<bool, AppError> {
        let node = self.lookup_id(id)?;
        let disabled = self.session.disabled.toggle(&node);
        debug!(id = %node.id, disabled, "toggled path-finding exclusion");
        Ok(disabled)
    }

    /// Plot a path between the selected endpoints, honoring the disabled
    /// set. `NoRouteFound` leaves the prior display state untouched.
    pub async fn plot_path(&mut self) -> Result<(), AppError> {
        let (start, end) = match (&self.session.start, &self.session.end) {
            (Some(s), Some(e)) => (s.clone(), e.clone()),
            _ => return Err(AppError::EndpointsNotSelected),
        };
        self.clear_focus();
        let generation = self.begin_query();
        let result = self
            .client
            .find_route(&start, &end, &self.session.disabled, &self.registry)
            .await;
        if !self.is_current(generation) {
            debug!(generation, "discarding stale path response");
            return Ok(());
        }
        let path = result?;
        self.apply_path(generation, path)?;
        Ok(())
    }

    /// Find the best route from a node to any configured gateway. Success
    /// also re-points the endpoint selection at origin and terminal.
    pub async fn find_path_to_internet(&mut self, origin_id: &str) -> Result<(), AppError> {
        let origin = self.lookup_id(origin_id)?;
        self.clear_focus();
        let generation = self.begin_query();
        let result = self.client.find_internet_route(&origin, &self.registry).await;
        if !self.is_current(generation) {
            debug!(generation, "discarding stale gateway response");
            return Ok(());
        }
        let path = result?;
        self.session.start = Some(origin);
        self.session.end = Some(path.terminal().clone());
        self.apply_path(generation, path)?;
        Ok(())
    }

    /// Fetch a node's direct edges and show the edges overlay. Neighbors
    /// the registry does not know are filtered out of the drawing.
    ///
    /// `EdgeProbe::Live` pings the node and can take up to a minute; the
    /// caller must have confirmed with the user first.
    pub async fn find_edges(&mut self, id: &str, probe: EdgeProbe) -> Result<(), AppError> {
        let node = self.lookup_id(id)?;
        self.clear_focus();
        let generation = self.begin_query();
        let result = self.client.fetch_edges(&node, probe).await;
        if !self.is_current(generation) {
            debug!(generation, "discarding stale edges response");
            return Ok(());
        }
        let edges = result?;
        let neighbors: Vec<(Node, f64)> = edges
            .iter()
            .filter_map(|edge| {
                self.registry
                    .by_network_number(edge.nn)
                    .map(|n| (n.clone(), edge.cost))
            })
            .collect();
        self.layers.show_edges_overlay(&node, &neighbors)?;
        self.session.edges_origin = Some(node);
        self.session.edges = edges;
        Ok(())
    }

    /// Clear the plotted path, the disabled set, and the focused overlay;
    /// base opacity restores unless the edges overlay still shows.
    pub fn clear_path(&mut self) -> Result<(), AppError> {
        self.layers.clear_path_overlay()?;
        self.session.path = None;
        self.session.disabled.clear();
        self.clear_focus();
        self.begin_query(); // invalidate anything still in flight
        Ok(())
    }

    /// Clear the edges overlay and its session state.
    pub fn clear_edges(&mut self) -> Result<(), AppError> {
        self.layers.clear_edges_overlay()?;
        self.session.edges_origin = None;
        self.session.edges.clear();
        self.clear_focus();
        self.begin_query();
        Ok(())
    }

    /// Flip active-node layer visibility.
    pub fn toggle_active_layer(&mut self) -> Result<bool, AppError> {
        Ok(self.layers.toggle_active_nodes(&self.registry)?)
    }

    /// Flip inactive-node layer visibility.
    pub fn toggle_inactive_layer(&mut self) -> Result<bool, AppError> {
        Ok(self.layers.toggle_inactive_nodes(&self.registry)?)
    }

    fn lookup_id(&self, id: &str) -> Result<Node, AppError> {
        self.registry
            .by_id(id)
            .cloned()
            .ok_or_else(|| {
                ClientError::LookupMiss {
                    key: id.to_owned(),
                    mode: SearchMode::Id,
                }
                .into()
            })
    }
}
