//! The storage seam the HTTP handlers depend on.

use async_trait::async_trait;

use drawflow_core::{EditorDocument, SaveOutcome};

use crate::client::{GraphClient, GraphError};

/// Persistence for the single editor document.
///
/// Implementations must make `save_editor` atomic with respect to the
/// existence check: two concurrent first saves must not both create.
#[async_trait]
pub trait EditorStore: Send + Sync {
    /// Prepare the backend for serving. With `drop_data` every stored
    /// document is destroyed first.
    async fn reset(&self, drop_data: bool) -> Result<(), GraphError>;

    /// The stored document, if any.
    async fn find_editor(&self) -> Result<Option<EditorDocument>, GraphError>;

    /// Create or overwrite the document with `content`.
    async fn save_editor(&self, content: &str) -> Result<SaveOutcome, GraphError>;
}

#[async_trait]
impl EditorStore for GraphClient {
    async fn reset(&self, drop_data: bool) -> Result<(), GraphError> {
        self.initialize_schema(drop_data).await
    }

    async fn find_editor(&self) -> Result<Option<EditorDocument>, GraphError> {
        GraphClient::find_editor(self).await
    }

    async fn save_editor(&self, content: &str) -> Result<SaveOutcome, GraphError> {
        self.upsert_editor(content).await
    }
}
