//! HTTP surface of the topology service.
//!
//! Consumed endpoints (JSON over GET):
//! - `fetch_nodes` — the full topology snapshot
//! - `path_finding?node1=&node2=[&disabled_node=]` — weighted hop sequence,
//!   empty array meaning "no route"
//! - `fetch_edges?node=` / `fetch_edges_hard?node=` — direct neighbors; the
//!   hard variant live-probes the node and can take up to a minute

use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

use meshmap_core::{NetworkNumber, Node, NodeRegistry, Path, PathSegment, RawNode};

use crate::config::ClientConfig;
use crate::error::{ClientError, SearchMode};
use crate::query::{DisabledNodes, PathQuery};
use crate::rank::rank;

/// One hop of a raw path-finding response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHop {
    pub node: NetworkNumber,
    pub weight: f64,
}

/// One direct neighbor of a probed node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeReport {
    pub nn: NetworkNumber,
    pub cost: f64,
}

/// Which edge endpoint to hit.
///
/// `Live` pings the node and may take up to a minute — callers must obtain
/// user confirmation before requesting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeProbe {
    Cached,
    Live,
}

/// Client of the topology service.
pub struct TopologyClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl TopologyClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        format!(
            "{}/{}",
            self.config.server_url.trim_end_matches('/'),
            path_and_query
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path_and_query);
        debug!(%url, "topology service request");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// The raw topology snapshot.
    pub async fn fetch_nodes(&self) -> Result<Vec<RawNode>, ClientError> {
        self.get_json("fetch_nodes").await
    }

    /// Fetch and index a fresh registry.
    pub async fn fetch_registry(&self) -> Result<NodeRegistry, ClientError> {
        Ok(NodeRegistry::load(self.fetch_nodes().await?))
    }

    /// Run one path-finding query; an empty vec means no route.
    pub async fn find_path(&self, query: &PathQuery) -> Result<Vec<RawHop>, ClientError> {
        self.get_json(&query.to_query_string()).await
    }

    /// Path-finding between two chosen endpoints, resolved against the
    /// registry. An empty response is `NoRouteFound` naming both endpoints.
    pub async fn find_route(
        &self,
        start: &Node,
        end: &Node,
        disabled: &DisabledNodes,
        registry: &NodeRegistry,
    ) -> Result<Path, ClientError> {
        let query = PathQuery::new(start, end).with_disabled(disabled);
        let hops = self.find_path(&query).await?;
        if hops.is_empty() {
            return Err(ClientError::NoRouteFound {
                start_id: start.id.clone(),
                end_id: end.id.clone(),
            });
        }
        resolve_path(&hops, registry)
    }

    /// Direct neighbors of a node, from cache or a live probe.
    pub async fn fetch_edges(
        &self,
        node: &Node,
        probe: EdgeProbe,
    ) -> Result<Vec<EdgeReport>, ClientError> {
        let endpoint = match probe {
            EdgeProbe::Cached => "fetch_edges",
            EdgeProbe::Live => "fetch_edges_hard",
        };
        self.get_json(&format!("{endpoint}?node={}", node.network_number))
            .await
    }

    /// Best path from `origin` to any configured gateway.
    ///
    /// All gateway queries are issued concurrently and joined — no early
    /// exit on first success, since a later, cheaper candidate may still
    /// arrive. A failed or empty candidate ranks last instead of failing
    /// the whole operation.
    pub async fn find_internet_route(
        &self,
        origin: &Node,
        registry: &NodeRegistry,
    ) -> Result<Path, ClientError> {
        let queries: Vec<PathQuery> = self
            .config
            .gateways
            .iter()
            .map(|&gateway| PathQuery::between(origin.network_number, gateway))
            .collect();

        let responses = join_all(queries.iter().map(|q| self.find_path(q))).await;

        let candidates: Vec<Option<Path>> = responses
            .into_iter()
            .zip(&queries)
            .map(|(response, query)| match response {
                Ok(hops) if hops.is_empty() => None,
                Ok(hops) => match resolve_path(&hops, registry) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        warn!(gateway = %query.end(), error = %e, "dropping unresolvable candidate");
                        None
                    }
                },
                Err(e) => {
                    warn!(gateway = %query.end(), error = %e, "gateway candidate failed");
                    None
                }
            })
            .collect();

        rank(origin, candidates)
    }
}

/// Resolve raw hops against the registry.
///
/// The input must be non-empty. An unknown network number is a
/// `LookupMiss` — a path drawn through a node the registry has never seen
/// would silently corrupt the overlay.
pub fn resolve_path(hops: &[RawHop], registry: &NodeRegistry) -> Result<Path, ClientError> {
    let segments = hops
        .iter()
        .map(|hop| {
            registry
                .by_network_number(hop.node)
                .cloned()
                .map(|node| PathSegment {
                    node,
                    weight_from_previous: hop.weight,
                })
                .ok_or_else(|| ClientError::LookupMiss {
                    key: hop.node.to_string(),
                    mode: SearchMode::NetworkNumber,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Path::from_segments(segments).ok_or_else(|| ClientError::LookupMiss {
        key: "(empty path)".to_owned(),
        mode: SearchMode::NetworkNumber,
    })
}
