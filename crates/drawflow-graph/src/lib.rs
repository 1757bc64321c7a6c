//! Drawflow Graph — Dgraph client for the editor document.
//!
//! This crate is the single mutation point for the editor document. All
//! reads and writes flow through the [`EditorStore`] trait, implemented by
//! [`GraphClient`] against Dgraph and by [`MemoryStore`] in process.

pub mod client;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use memory::MemoryStore;
pub use schema::{initialize, SCHEMA};
pub use store::EditorStore;
