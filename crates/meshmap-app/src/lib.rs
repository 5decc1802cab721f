//! meshmap-app — the thin layer tying user interactions to the core.
//!
//! `Coordinator` owns the session: the current registry, endpoint
//! selection, disabled set, overlays, and the request-generation counter
//! that keeps late responses from clobbering newer state. Everything it
//! draws goes through the layer state machine; it never touches the render
//! surface directly.

pub mod coordinator;

pub use coordinator::{AppError, Coordinator, OverlayContent, Session};
