//! Schema declaration and startup reset.

use crate::client::{GraphClient, GraphError};
use crate::store::EditorStore;

/// Predicates of the editor document.
///
/// `@upsert` on `name` puts its index keys in each transaction's conflict
/// set, so two upserts that both find no document cannot both commit.
pub const SCHEMA: &str = "name: string @index(exact, term) @lang @upsert .
editor: string .";

impl GraphClient {
    /// Optionally drop all data, then declare [`SCHEMA`].
    ///
    /// Both steps are attempted even if the drop fails; the first error is
    /// returned.
    pub async fn initialize_schema(&self, drop_data: bool) -> Result<(), GraphError> {
        let dropped = if drop_data {
            tracing::warn!("Dropping all Dgraph data");
            self.alter_drop_all().await
        } else {
            Ok(())
        };

        let declared = self.alter_schema(SCHEMA).await;
        if declared.is_ok() {
            tracing::info!("Schema declared");
        }

        dropped.and(declared)
    }
}

/// Reset the store at startup. Failures are logged, never returned.
pub async fn initialize(store: &dyn EditorStore, drop_data: bool) {
    if let Err(e) = store.reset(drop_data).await {
        tracing::error!(error = %e, drop_data, "Failed to initialize database");
    }
}
