//! Domain types for the single editor document.
//!
//! The document is stored as one Dgraph node carrying the `name` and
//! `editor` predicates. Its JSON shape is shared by queries, mutations and
//! the in-memory store.

use serde::{Deserialize, Serialize};

/// Lookup key of the one and only editor document.
pub const EDITOR_NAME: &str = "Editor";

/// Blank-node placeholder used when the document is created without an
/// upsert block.
pub const EDITOR_BLANK_NODE: &str = "_:editor";

/// The persisted editor document.
///
/// `uid` is assigned by the database and omitted from mutation payloads
/// when unknown. `name` and `editor` default to empty so partial query
/// results (e.g. `{ uid }` only) still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub editor: String,
}

impl EditorDocument {
    /// A new, not yet persisted document holding `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            uid: None,
            name: EDITOR_NAME.to_string(),
            editor: content.into(),
        }
    }

    /// A document bound to an existing (or placeholder) uid.
    pub fn with_uid(uid: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Self::new(content)
        }
    }
}

/// Result of saving new editor content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No document existed; one was created with the given uid.
    Created { uid: String },
    /// The existing document with the given uid was overwritten.
    Updated { uid: String },
}

impl SaveOutcome {
    /// The word reported to HTTP clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            Self::Created { uid } | Self::Updated { uid } => uid,
        }
    }
}
