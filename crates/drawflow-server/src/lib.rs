//! drawflow-server: HTTP front end for the Drawflow editor document.
//!
//! Two GET routes (`/saveEditor`, `/readEditor`) backed by any
//! [`EditorStore`]. The store is owned by the binary and shared with the
//! handlers through [`AppState`].

use std::sync::Arc;

use drawflow_graph::EditorStore;

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

pub use router::build_router;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EditorStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EditorStore>) -> Self {
        Self { store }
    }
}
