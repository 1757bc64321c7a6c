//! Dgraph connection management and shared graph client.
//!
//! Talks to the HTTP endpoint of a Dgraph Alpha (`/health`, `/alter`,
//! `/query`, `/mutate`). Every response is wrapped in Dgraph's
//! `{"data": ..., "errors": [...]}` envelope.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use drawflow_core::EditorDocument;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Dgraph connection error: {0}")]
    Connection(String),

    #[error("Dgraph request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Dgraph error: {0}")]
    Dgraph(String),

    #[error("Dgraph returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration for connecting to Dgraph.
///
/// Loaded from the `[dgraph]` config section or `DRAWFLOW__DGRAPH__`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Base URL of the Alpha HTTP endpoint.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// A mutation sent to `/mutate?commitNow=true`.
///
/// With `query` set this is an upsert block: the query runs and the
/// conditional mutations apply atomically in one transaction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MutationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mutations: Vec<ConditionalMutation>,
}

/// One mutation inside an upsert block, applied only if `cond` holds.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionalMutation {
    pub cond: String,
    pub set: Vec<EditorDocument>,
}

/// The `data` part of a mutation response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MutationResponse {
    /// Uids assigned to blank nodes, keyed by blank-node name without `_:`.
    #[serde(default)]
    pub uids: Option<std::collections::HashMap<String, String>>,

    /// Results of the upsert block's query, keyed by query block name.
    #[serde(default)]
    pub queries: Option<std::collections::HashMap<String, Vec<EditorDocument>>>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Thread-safe Dgraph client with HTTP connection pooling.
///
/// This is the single point of access for all database operations.
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
}

impl GraphClient {
    /// Connect to Dgraph with the given configuration.
    ///
    /// Fails if the Alpha does not answer its health check.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let client = Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        };

        client
            .health()
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Dgraph");
        Ok(client)
    }

    /// Check that the Alpha is up.
    pub async fn health(&self) -> Result<(), GraphError> {
        let response = self.http.get(self.endpoint("/health")).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Drop every node, predicate and schema entry.
    pub async fn alter_drop_all(&self) -> Result<(), GraphError> {
        let request = self
            .http
            .post(self.endpoint("/alter"))
            .json(&serde_json::json!({ "drop_all": true }));
        self.send::<serde_json::Value>(request).await?;
        Ok(())
    }

    /// Declare (or extend) the schema.
    pub async fn alter_schema(&self, schema: &str) -> Result<(), GraphError> {
        let request = self
            .http
            .post(self.endpoint("/alter"))
            .body(schema.to_string());
        self.send::<serde_json::Value>(request).await?;
        Ok(())
    }

    /// Run a read-only DQL query with string variables and decode `data`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        dql: &str,
        variables: &[(&str, &str)],
    ) -> Result<T, GraphError> {
        let request = self
            .http
            .post(self.endpoint("/query"))
            .json(&query_body(dql, variables));
        self.send(request).await
    }

    /// Run a mutation (or upsert block) and commit it immediately.
    pub async fn mutate(&self, mutation: &MutationRequest) -> Result<MutationResponse, GraphError> {
        let request = self
            .http
            .post(self.endpoint("/mutate"))
            .query(&[("commitNow", "true")])
            .json(mutation);
        self.send(request).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GraphError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }
}

/// JSON body for `/query`: `{"query": ..., "variables": {"$name": ...}}`.
fn query_body(dql: &str, variables: &[(&str, &str)]) -> serde_json::Value {
    let variables: serde_json::Map<String, serde_json::Value> = variables
        .iter()
        .map(|(k, v)| ((*k).to_string(), serde_json::Value::String((*v).to_string())))
        .collect();

    serde_json::json!({ "query": dql, "variables": variables })
}

/// Decode a Dgraph response body, surfacing `errors` and HTTP failures.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, GraphError> {
    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(GraphError::Status {
                status: status.as_u16(),
                body: body.to_string(),
            })
        }
        Err(e) => {
            return Err(GraphError::Serialization(format!(
                "Failed to decode Dgraph response: {e}"
            )))
        }
    };

    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(GraphError::Dgraph(messages.join("; ")));
    }

    envelope
        .data
        .ok_or_else(|| GraphError::Serialization("Dgraph response has no data".to_string()))
}
