//! meshmap-client — consumer of the mesh topology service.
//!
//! - **config**: env-driven client configuration (server URL, gateway set)
//! - **query**: path-finding request construction and the insertion-ordered
//!   disabled-node set
//! - **rank**: deterministic multi-candidate path ranking
//! - **client**: `TopologyClient`, the HTTP surface — node snapshots, path
//!   queries, edge probes, and the concurrent gateway fan-out

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod rank;

pub use client::{resolve_path, EdgeProbe, EdgeReport, RawHop, TopologyClient};
pub use config::ClientConfig;
pub use error::{ClientError, SearchMode};
pub use query::{DisabledNodes, PathQuery};
pub use rank::rank;
