//! drawflow-core: Shared types, configuration, and error handling for the
//! Drawflow editor store.
//!
//! This crate provides the pieces used by both the graph client and the
//! HTTP server:
//! - The editor document model and save outcomes
//! - Layered configuration loading (file + environment + defaults)
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use error::DrawflowError;
pub use types::{EditorDocument, SaveOutcome, EDITOR_BLANK_NODE, EDITOR_NAME};
