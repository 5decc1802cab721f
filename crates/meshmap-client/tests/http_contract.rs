//! Wire-contract tests for `TopologyClient` against a mock topology
//! service.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meshmap_client::{ClientConfig, ClientError, DisabledNodes, TopologyClient};
use meshmap_core::{NetworkNumber, Node, NodeRegistry, RawNode};

fn raw_node(id: &str, nn: u32, kind: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nn": nn,
        "address": format!("10.{nn}"),
        "lat": 40.7 + nn as f64 * 0.001,
        "lng": -73.9,
        "alt": 30.0,
        "type": kind,
    })
}

async fn client_for(server: &MockServer) -> TopologyClient {
    TopologyClient::new(ClientConfig::with_server_url(server.uri()))
}

fn registry_of(records: Vec<serde_json::Value>) -> NodeRegistry {
    let raw: Vec<RawNode> = serde_json::from_value(serde_json::Value::Array(records)).unwrap();
    NodeRegistry::load(raw)
}

fn lookup(registry: &NodeRegistry, id: &str) -> Node {
    registry.by_id(id).cloned().unwrap()
}

#[tokio::test]
async fn fetch_nodes_loads_partial_snapshots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch_nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            raw_node("good", 1340, "node"),
            { "id": "no-coords", "nn": 9 },
            raw_node("hub", 227, "hub"),
        ])))
        .mount(&server)
        .await;

    let registry = client_for(&server).await.fetch_registry().await.unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.by_id("good").is_some());
    assert!(registry.by_id("no-coords").is_none());
}

#[tokio::test]
async fn fetch_failure_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch_nodes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).await.fetch_nodes().await.unwrap_err();
    assert!(matches!(err, ClientError::Fetch(_)));
}

#[tokio::test]
async fn empty_path_response_names_both_endpoints() {
    let records = vec![raw_node("start", 1, "node"), raw_node("end", 2, "node")];
    let registry = registry_of(records);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/path_finding"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .find_route(
            &lookup(&registry, "start"),
            &lookup(&registry, "end"),
            &DisabledNodes::new(),
            &registry,
        )
        .await
        .unwrap_err();

    match err {
        ClientError::NoRouteFound { start_id, end_id } => {
            assert_eq!(start_id, "start");
            assert_eq!(end_id, "end");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_disabled_set_never_reaches_the_wire() {
    let records = vec![raw_node("start", 1, "node"), raw_node("end", 2, "node")];
    let registry = registry_of(records);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/path_finding"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "node": 1, "weight": 0 },
            { "node": 2, "weight": 3.5 },
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let path = client
        .find_route(
            &lookup(&registry, "start"),
            &lookup(&registry, "end"),
            &DisabledNodes::new(),
            &registry,
        )
        .await
        .unwrap();
    assert_eq!(path.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let url = &requests[0].url;
    assert!(url.query_pairs().any(|(k, _)| k == "node1"));
    assert!(
        !url.query_pairs().any(|(k, _)| k == "disabled_node"),
        "disabled_node must be absent, got {url}"
    );
}

#[tokio::test]
async fn disabled_nodes_serialize_as_csv_in_insertion_order() {
    let records = vec![
        raw_node("start", 1, "node"),
        raw_node("end", 2, "node"),
        raw_node("skip-a", 42, "node"),
        raw_node("skip-b", 7, "node"),
    ];
    let registry = registry_of(records);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/path_finding"))
        .and(query_param("node1", "1"))
        .and(query_param("node2", "2"))
        .and(query_param("disabled_node", "42,7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "node": 1, "weight": 0 },
            { "node": 2, "weight": 9.0 },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut disabled = DisabledNodes::new();
    disabled.toggle(&lookup(&registry, "skip-a"));
    disabled.toggle(&lookup(&registry, "skip-b"));

    let client = client_for(&server).await;
    client
        .find_route(
            &lookup(&registry, "start"),
            &lookup(&registry, "end"),
            &disabled,
            &registry,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn internet_route_fans_out_and_picks_the_cheapest() {
    let records = vec![
        raw_node("origin", 1, "node"),
        raw_node("mid", 5, "node"),
        raw_node("gw-a", 713, "supernode"),
        raw_node("gw-b", 227, "supernode"),
    ];
    let registry = registry_of(records);
    let server = MockServer::start().await;

    // Route to 713: direct but expensive.
    Mock::given(method("GET"))
        .and(path("/path_finding"))
        .and(query_param("node2", "713"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "node": 1, "weight": 0 },
            { "node": 713, "weight": 20.0 },
        ])))
        .mount(&server)
        .await;
    // Route to 227: one more hop, half the cost.
    Mock::given(method("GET"))
        .and(path("/path_finding"))
        .and(query_param("node2", "227"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "node": 1, "weight": 0 },
            { "node": 5, "weight": 4.0 },
            { "node": 227, "weight": 6.0 },
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let origin = lookup(&registry, "origin");
    let best = client.find_internet_route(&origin, &registry).await.unwrap();
    assert_eq!(best.terminal().network_number, NetworkNumber(227));
    assert_eq!(best.total_cost(), 10.0);

    // Both gateways were queried — no early exit on first success.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn internet_route_with_no_candidates_names_the_origin() {
    let records = vec![raw_node("origin", 1, "node")];
    let registry = registry_of(records);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/path_finding"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let origin = lookup(&registry, "origin");
    let err = client
        .find_internet_route(&origin, &registry)
        .await
        .unwrap_err();
    match err {
        ClientError::NoGatewayRoute { origin_id } => assert_eq!(origin_id, "origin"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn edge_probe_selects_the_hard_endpoint() {
    let records = vec![raw_node("probe", 1340, "hub")];
    let registry = registry_of(records);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch_edges_hard"))
        .and(query_param("node", "1340"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "nn": 227, "cost": 2.5 },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let edges = client
        .fetch_edges(
            &lookup(&registry, "probe"),
            meshmap_client::EdgeProbe::Live,
        )
        .await
        .unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].nn, NetworkNumber(227));
}
