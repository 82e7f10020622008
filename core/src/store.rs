//! Stateless HTTP request builder and response parser for the hosted todo
//! collection.
//!
//! # Design
//! `RemoteTodoStore` holds the collection URL and API token and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies. Any 2xx status counts
//! as success; everything else is classified through the API's error
//! envelope. No retries, no caching.

use serde::Deserialize;

use crate::error::SyncError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::TodoQuery;
use crate::types::{
    CreateRecord, CreateRecords, RecordFields, RecordPage, Todo, UpdateRecord, UpdateRecords,
};

/// Stateless translator between todo operations and the record API.
///
/// `base_url` is the full collection URL (for a hosted table that is
/// `{api}/{base-id}/{table-name}`); every built request carries
/// `authorization: Bearer {token}`.
#[derive(Debug, Clone)]
pub struct RemoteTodoStore {
    base_url: String,
    token: String,
}

impl RemoteTodoStore {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn build_list_todos(&self, query: &TodoQuery) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?{}", self.base_url, query.encode()),
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    /// Builds the create request. An empty title is rejected here, before any
    /// request exists, so invalid input never reaches the wire.
    pub fn build_create_todo(&self, title: &str) -> Result<HttpRequest, SyncError> {
        if title.is_empty() {
            return Err(SyncError::EmptyTitle);
        }
        let payload = CreateRecords {
            records: vec![CreateRecord {
                fields: RecordFields {
                    title: title.to_string(),
                    is_completed: false,
                },
            }],
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| SyncError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.base_url.clone(),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    /// Builds the update request. The full field set of `todo` is written
    /// back, so callers flip `is_completed` or swap `title` on a clone and
    /// pass that.
    pub fn build_update_todo(&self, todo: &Todo) -> Result<HttpRequest, SyncError> {
        let payload = UpdateRecords {
            records: vec![UpdateRecord {
                id: todo.id.clone(),
                fields: todo.to_fields(),
            }],
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| SyncError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/{}", self.base_url, todo.id),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    /// Decodes the record page, normalizing each record and preserving the
    /// server's order.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, SyncError> {
        check_status(&response)?;
        let page: RecordPage = serde_json::from_str(&response.body)
            .map_err(|e| SyncError::Deserialization(e.to_string()))?;
        Ok(page.records.into_iter().map(Todo::from).collect())
    }

    /// Returns the created todo with its server-assigned id.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, SyncError> {
        check_status(&response)?;
        let page: RecordPage = serde_json::from_str(&response.body)
            .map_err(|e| SyncError::Deserialization(e.to_string()))?;
        let record = page.records.into_iter().next().ok_or_else(|| {
            SyncError::Deserialization("create response contained no records".to_string())
        })?;
        Ok(Todo::from(record))
    }

    /// Success/failure only; the update response body carries no contract.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), SyncError> {
        check_status(&response)
    }

    fn auth_header(&self) -> (String, String) {
        (
            "authorization".to_string(),
            format!("Bearer {}", self.token),
        )
    }

    fn json_headers(&self) -> Vec<(String, String)> {
        vec![
            self.auth_header(),
            ("content-type".to_string(), "application/json".to_string()),
        ]
    }
}

/// Treat any 2xx as success; classify everything else via the error envelope.
fn check_status(response: &HttpResponse) -> Result<(), SyncError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(SyncError::Remote {
        status: response.status,
        message: remote_message(&response.body),
    })
}

/// Extract a human-readable message from an error response body.
///
/// The API reports failures as `{"error":{"type":..,"message":..}}`; when the
/// body has that shape the server's message is used, otherwise the raw body,
/// otherwise a stock phrase.
fn remote_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }
    #[derive(Deserialize)]
    struct Detail {
        message: String,
    }
    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        return envelope.error.message;
    }
    let raw = body.trim();
    if raw.is_empty() {
        "request failed".to_string()
    } else {
        raw.to_string()
    }
}
