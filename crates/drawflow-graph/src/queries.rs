//! Read operations for the editor document.

use serde::Deserialize;

use drawflow_core::{EditorDocument, EDITOR_NAME};

use crate::client::{GraphClient, GraphError};

const FIND_EDITOR: &str = r#"query editor($name: string) {
  me(func: eq(name, $name)) {
    uid
    editor
  }
}"#;

#[derive(Debug, Deserialize)]
struct EditorQuery {
    #[serde(default)]
    me: Vec<EditorDocument>,
}

impl GraphClient {
    /// Look up the editor document by its fixed name.
    ///
    /// Returns the first match; `None` when no document has been saved yet.
    pub async fn find_editor(&self) -> Result<Option<EditorDocument>, GraphError> {
        let result: EditorQuery = self
            .query(FIND_EDITOR, &[("$name", EDITOR_NAME)])
            .await?;

        if result.me.len() > 1 {
            tracing::warn!(count = result.me.len(), "Multiple editor documents found");
        }

        Ok(first_with_uid(result.me))
    }
}

/// Dgraph can return a bare `{}` for nodes without the requested predicates.
fn first_with_uid(docs: Vec<EditorDocument>) -> Option<EditorDocument> {
    docs.into_iter().find(|doc| doc.uid.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_not_found() {
        let q: EditorQuery = serde_json::from_str(r#"{"me":[]}"#).unwrap();
        assert_eq!(first_with_uid(q.me), None);
    }

    #[test]
    fn missing_block_is_not_found() {
        let q: EditorQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(first_with_uid(q.me), None);
    }

    #[test]
    fn picks_first_document_with_uid() {
        let q: EditorQuery = serde_json::from_str(
            r#"{"me":[{},{"uid":"0x7","editor":"a"},{"uid":"0x8","editor":"b"}]}"#,
        )
        .unwrap();
        let doc = first_with_uid(q.me).unwrap();
        assert_eq!(doc.uid.as_deref(), Some("0x7"));
        assert_eq!(doc.editor, "a");
    }
}
