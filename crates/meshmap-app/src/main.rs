use tracing::info;

use meshmap_app::Coordinator;
use meshmap_client::{ClientConfig, EdgeProbe, TopologyClient};
use meshmap_core::NodeRole;
use meshmap_render::MemorySurface;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("meshmap — mesh topology explorer");

    let config = ClientConfig::from_env();
    info!(server = %config.server_url, gateways = config.gateways.len(), "configured");

    let client = TopologyClient::new(config);
    let mut coordinator = Coordinator::new(client, MemorySurface::new());

    coordinator.refresh_topology().await?;
    let registry = coordinator.registry();
    info!(
        normal = registry.count_by_role(NodeRole::Normal),
        hubs = registry.count_by_role(NodeRole::Hub),
        gateways = registry.count_by_role(NodeRole::Gateway),
        inactive = registry.inactive().len(),
        "topology snapshot"
    );

    // MESHMAP_PATH=<start_id>,<end_id> — plot a path and log its hops.
    if let Ok(pair) = std::env::var("MESHMAP_PATH") {
        let Some((start, end)) = pair.split_once(',') else {
            return Err(format!("MESHMAP_PATH must be <start_id>,<end_id>, got {pair:?}").into());
        };
        coordinator.select_start(start.trim())?;
        coordinator.select_end(end.trim())?;
        coordinator.plot_path().await?;
        log_path(&coordinator);
    }

    // MESHMAP_INTERNET_FROM=<id> — best route to any configured gateway.
    if let Ok(id) = std::env::var("MESHMAP_INTERNET_FROM") {
        coordinator.find_path_to_internet(id.trim()).await?;
        log_path(&coordinator);
    }

    // MESHMAP_EDGES_OF=<id> — cached direct edges of one node.
    if let Ok(id) = std::env::var("MESHMAP_EDGES_OF") {
        coordinator.find_edges(id.trim(), EdgeProbe::Cached).await?;
        for edge in &coordinator.session().edges {
            info!(nn = %edge.nn, cost = edge.cost, "edge");
        }
    }

    Ok(())
}

fn log_path(coordinator: &Coordinator<MemorySurface>) {
    if let Some(path) = &coordinator.session().path {
        info!(
            hops = path.len(),
            cost = path.total_cost(),
            terminal = %path.terminal().id,
            "path found"
        );
        for segment in path.segments() {
            info!(
                id = %segment.node.id,
                nn = %segment.node.network_number,
                weight = segment.weight_from_previous,
                "hop"
            );
        }
    }
}
