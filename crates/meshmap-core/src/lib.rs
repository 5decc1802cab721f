//! meshmap-core — typed mesh topology data for the meshmap workspace.
//!
//! Leaf crate, no I/O and no async:
//!
//! - **node**: `Node` value records, roles, and the raw wire shape
//! - **codec**: compact network number ↔ dotted address translation
//! - **registry**: indexed, role-ordered snapshot of a topology fetch
//! - **path**: weighted hop sequences returned by path-finding queries
//! - **geo**: great-circle distance used as a ranking tie-break

pub mod codec;
pub mod geo;
pub mod node;
pub mod path;
pub mod registry;

// Re-export primary types for convenience
pub use codec::CodecError;
pub use node::{NetworkNumber, Node, NodeRole, RawNode};
pub use path::{Path, PathSegment};
pub use registry::NodeRegistry;
