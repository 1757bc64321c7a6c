//! Request handlers for `/saveEditor` and `/readEditor`.
//!
//! Every body is a JSON-encoded string. Store failures become HTTP 500
//! through [`ApiError`]; everything else answers 200.

use axum::extract::{Query, State};
use axum::Json;

use crate::error::ApiError;
use crate::AppState;

/// Query/form field carrying new editor content.
pub const EDITOR_FIELD: &str = "Editor";

/// Reply to a save without content when no document exists.
pub const NO_EDITOR: &str = "there is no a editor";

/// Reply to a save without content when a document exists.
pub const NO_NEW_EDITOR: &str = "There is a editor but no a new one";

/// Reply to a read when no document exists.
pub const EMPTY: &str = "Empty";

/// `GET /saveEditor?Editor=...`
///
/// With `Editor` present (even empty) the document is created or
/// overwritten and the reply is `"created"` or `"updated"`. Without it
/// nothing is written and the reply says whether a document exists.
pub async fn save_editor(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<String>, ApiError> {
    // Repeated fields: the first one wins.
    let content = params
        .into_iter()
        .find(|(key, _)| key == EDITOR_FIELD)
        .map(|(_, value)| value);

    let Some(content) = content else {
        let message = match state.store.find_editor().await? {
            Some(_) => NO_NEW_EDITOR,
            None => NO_EDITOR,
        };
        tracing::debug!(message, "Save without editor content");
        return Ok(Json(message.to_string()));
    };

    let outcome = state.store.save_editor(&content).await?;
    Ok(Json(outcome.as_str().to_string()))
}

/// `GET /readEditor`
pub async fn read_editor(State(state): State<AppState>) -> Result<Json<String>, ApiError> {
    match state.store.find_editor().await? {
        Some(doc) => Ok(Json(doc.editor)),
        None => Ok(Json(EMPTY.to_string())),
    }
}
