//! Client error taxonomy. Every variant is recoverable and user-facing;
//! none is fatal to the process.

use std::fmt;

use meshmap_core::CodecError;

/// Which index a lookup ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Id,
    NetworkNumber,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Id => f.write_str("ID"),
            SearchMode::NetworkNumber => f.write_str("NN"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network or service failure; display state resets, the action must be
    /// retried manually.
    #[error("topology service request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Empty path-finding result between two chosen endpoints.
    #[error("failed to find a path between {start_id} and {end_id}")]
    NoRouteFound { start_id: String, end_id: String },

    /// Every gateway candidate failed or came back empty.
    #[error("node {origin_id} is not connected to the internet")]
    NoGatewayRoute { origin_id: String },

    /// A search or path resolution found no matching node.
    #[error("no node with {mode} {key} found")]
    LookupMiss { key: String, mode: SearchMode },

    #[error(transparent)]
    InvalidIdentifier(#[from] CodecError),
}
