//! Write operations for the editor document.
//!
//! Saving is a single upsert block: the lookup by name and the write are
//! committed in one Dgraph transaction. Because `name` is declared with
//! `@upsert`, a concurrent save that also found no document conflicts and
//! aborts instead of creating a second one.

use drawflow_core::{EditorDocument, SaveOutcome, EDITOR_BLANK_NODE, EDITOR_NAME};

use crate::client::{ConditionalMutation, GraphClient, GraphError, MutationRequest, MutationResponse};

/// Query block name inside the upsert.
const UPSERT_BLOCK: &str = "q";

impl GraphClient {
    /// Create the editor document if absent, otherwise overwrite its content.
    pub async fn upsert_editor(&self, content: &str) -> Result<SaveOutcome, GraphError> {
        let response = self.mutate(&upsert_request(content)).await?;
        let outcome = outcome_from_upsert(&response)?;

        tracing::info!(
            uid = %outcome.uid(),
            outcome = outcome.as_str(),
            bytes = content.len(),
            "Saved editor document"
        );
        Ok(outcome)
    }
}

/// Build the upsert block for `content`.
///
/// `v` binds at most one existing uid. With none bound the document is
/// created through the `_:editor` blank node; otherwise `uid(v)` is updated.
pub(crate) fn upsert_request(content: &str) -> MutationRequest {
    let query = format!(
        r#"{{ {UPSERT_BLOCK}(func: eq(name, "{EDITOR_NAME}"), first: 1) {{ v as uid }} }}"#
    );

    MutationRequest {
        query: Some(query),
        mutations: vec![
            ConditionalMutation {
                cond: "@if(eq(len(v), 0))".to_string(),
                set: vec![EditorDocument::with_uid(EDITOR_BLANK_NODE, content)],
            },
            ConditionalMutation {
                cond: "@if(gt(len(v), 0))".to_string(),
                set: vec![EditorDocument::with_uid("uid(v)", content)],
            },
        ],
    }
}

/// Decide whether the upsert created or updated the document.
pub(crate) fn outcome_from_upsert(response: &MutationResponse) -> Result<SaveOutcome, GraphError> {
    let blank = EDITOR_BLANK_NODE.trim_start_matches("_:");
    if let Some(uid) = response.uids.as_ref().and_then(|uids| uids.get(blank)) {
        return Ok(SaveOutcome::Created { uid: uid.clone() });
    }

    let existing = response
        .queries
        .as_ref()
        .and_then(|queries| queries.get(UPSERT_BLOCK))
        .and_then(|docs| docs.iter().find_map(|doc| doc.uid.clone()));

    match existing {
        Some(uid) => Ok(SaveOutcome::Updated { uid }),
        None => Err(GraphError::Serialization(
            "Upsert response has neither a new nor an existing uid".to_string(),
        )),
    }
}
