//! In-process editor store.
//!
//! Mirrors the Dgraph semantics (hex uids, create-then-update) without a
//! database. Used by tests and by the server's `memory` backend.

use async_trait::async_trait;
use tokio::sync::Mutex;

use drawflow_core::{EditorDocument, SaveOutcome};

use crate::client::GraphError;
use crate::store::EditorStore;

#[derive(Debug, Default)]
struct MemoryState {
    document: Option<EditorDocument>,
    next_uid: u64,
}

/// A store holding the editor document in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EditorStore for MemoryStore {
    async fn reset(&self, drop_data: bool) -> Result<(), GraphError> {
        if drop_data {
            self.state.lock().await.document = None;
            tracing::warn!("Dropped in-memory editor document");
        }
        Ok(())
    }

    async fn find_editor(&self) -> Result<Option<EditorDocument>, GraphError> {
        Ok(self.state.lock().await.document.clone())
    }

    async fn save_editor(&self, content: &str) -> Result<SaveOutcome, GraphError> {
        let mut state = self.state.lock().await;

        if let Some(doc) = state.document.as_mut() {
            doc.editor = content.to_string();
            let uid = doc.uid.clone().unwrap_or_default();
            return Ok(SaveOutcome::Updated { uid });
        }

        state.next_uid += 1;
        let uid = format!("{:#x}", state.next_uid);
        state.document = Some(EditorDocument::with_uid(uid.clone(), content));
        Ok(SaveOutcome::Created { uid })
    }
}
