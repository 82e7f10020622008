//! In-memory mock of the hosted record API the todo sync core talks to.
//!
//! # Design
//! Speaks the record-envelope dialect: every payload wraps records in a
//! `records` array with user data nested under `fields`. Every route requires
//! a bearer token, every failure comes back as
//! `{"error":{"type":..,"message":..}}`, and the list route understands
//! `sort[0][field]`/`sort[0][direction]` plus the one filter formula the
//! client produces, `SEARCH("term", title)`, matched as a plain substring of
//! the title. Records live in insertion order in a `Vec` behind an `RwLock`;
//! ids and creation timestamps are server-assigned.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// The user-visible fields of a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// One record as it appears in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    pub fields: RecordFields,
}

/// The `records` envelope wrapping every successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPage {
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub records: Vec<CreateEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEntry {
    pub fields: RecordFields,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub records: Vec<UpdateEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntry {
    pub id: String,
    pub fields: RecordFields,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    id: String,
    created_time: DateTime<Utc>,
    title: String,
    is_completed: bool,
}

impl StoredRecord {
    fn to_record(&self) -> Record {
        Record {
            id: self.id.clone(),
            created_time: self
                .created_time
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            fields: RecordFields {
                title: self.title.clone(),
                is_completed: self.is_completed,
            },
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    token: String,
    records: RwLock<Vec<StoredRecord>>,
}

pub type SharedState = Arc<AppState>;

pub fn app(token: &str) -> Router {
    let state: SharedState = Arc::new(AppState {
        token: token.to_string(),
        records: RwLock::new(Vec::new()),
    });
    Router::new()
        .route("/todos", get(list_records).post(create_records))
        .route("/todos/{id}", patch(update_record))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

/// Rejects any request whose `Authorization` header is not exactly
/// `Bearer {token}`.
async fn require_bearer(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let expected = format!("Bearer {}", state.token);
    let supplied = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if supplied != Some(expected.as_str()) {
        tracing::debug!("rejected request without a valid bearer token");
        return api_error(
            StatusCode::UNAUTHORIZED,
            "AUTHENTICATION_REQUIRED",
            "Invalid authentication token",
        );
    }
    next.run(request).await
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(rename = "sort[0][field]")]
    sort_field: Option<String>,
    #[serde(rename = "sort[0][direction]")]
    sort_direction: Option<String>,
    #[serde(rename = "filterByFormula")]
    filter_by_formula: Option<String>,
}

async fn list_records(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecordPage>, Response> {
    let mut records: Vec<StoredRecord> = state.records.read().await.clone();

    if let Some(formula) = params.filter_by_formula.as_deref() {
        let term = parse_search_formula(formula).ok_or_else(|| {
            api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_FILTER_BY_FORMULA",
                "The formula is invalid",
            )
        })?;
        records.retain(|record| record.title.contains(term));
    }

    match params.sort_field.as_deref().unwrap_or("createdTime") {
        "createdTime" => records.sort_by_key(|record| record.created_time),
        "title" => records.sort_by(|a, b| a.title.cmp(&b.title)),
        other => {
            return Err(api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                &format!("Unknown sort field {other:?}"),
            ))
        }
    }
    match params.sort_direction.as_deref().unwrap_or("asc") {
        "asc" => {}
        "desc" => records.reverse(),
        other => {
            return Err(api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                &format!("Unknown sort direction {other:?}"),
            ))
        }
    }

    tracing::debug!(count = records.len(), "listing records");
    Ok(Json(RecordPage {
        records: records.iter().map(StoredRecord::to_record).collect(),
    }))
}

async fn create_records(
    State(state): State<SharedState>,
    body: String,
) -> Result<Json<RecordPage>, Response> {
    let input: CreateRequest = parse_body(&body)?;
    if input.records.iter().any(|entry| entry.fields.title.is_empty()) {
        return Err(invalid_title());
    }

    let mut created = Vec::with_capacity(input.records.len());
    let mut records = state.records.write().await;
    for entry in input.records {
        let stored = StoredRecord {
            id: new_record_id(),
            created_time: Utc::now(),
            title: entry.fields.title,
            is_completed: entry.fields.is_completed,
        };
        tracing::debug!(id = %stored.id, "created record");
        created.push(stored.to_record());
        records.push(stored);
    }
    Ok(Json(RecordPage { records: created }))
}

async fn update_record(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<RecordPage>, Response> {
    let input: UpdateRequest = parse_body(&body)?;
    let entry = input
        .records
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| {
            api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_RECORDS",
                "Request body does not address the record in the path",
            )
        })?;
    if entry.fields.title.is_empty() {
        return Err(invalid_title());
    }

    let mut records = state.records.write().await;
    let stored = records
        .iter_mut()
        .find(|record| record.id == id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Record not found"))?;
    stored.title = entry.fields.title;
    stored.is_completed = entry.fields.is_completed;
    tracing::debug!(id = %stored.id, "updated record");
    Ok(Json(RecordPage {
        records: vec![stored.to_record()],
    }))
}

/// Every failing response carries the hosted API's error envelope.
fn api_error(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "error": { "type": kind, "message": message }
    });
    (status, Json(body)).into_response()
}

fn invalid_title() -> Response {
    api_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_VALUE",
        "Title must not be empty",
    )
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Response> {
    serde_json::from_str(body).map_err(|e| {
        api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_REQUEST_BODY",
            &format!("Could not parse request body: {e}"),
        )
    })
}

/// `rec` plus 14 hex characters, the shape hosted record ids have.
fn new_record_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("rec{}", &hex[..14])
}

/// Accepts exactly the formula shape the client produces:
/// `SEARCH("term", title)`. Returns the term.
fn parse_search_formula(formula: &str) -> Option<&str> {
    formula.strip_prefix("SEARCH(\"")?.strip_suffix("\", title)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_envelope_field_names() {
        let record = Record {
            id: "rec0123456789abcd".to_string(),
            created_time: "2024-05-01T12:00:00.000Z".to_string(),
            fields: RecordFields {
                title: "Test".to_string(),
                is_completed: false,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "rec0123456789abcd");
        assert_eq!(json["createdTime"], "2024-05-01T12:00:00.000Z");
        assert_eq!(json["fields"]["title"], "Test");
        assert_eq!(json["fields"]["isCompleted"], false);
    }

    #[test]
    fn create_request_defaults_is_completed_to_false() {
        let input: CreateRequest =
            serde_json::from_str(r#"{"records":[{"fields":{"title":"No flag"}}]}"#).unwrap();
        assert_eq!(input.records.len(), 1);
        assert_eq!(input.records[0].fields.title, "No flag");
        assert!(!input.records[0].fields.is_completed);
    }

    #[test]
    fn update_request_requires_record_id() {
        let result: Result<UpdateRequest, _> =
            serde_json::from_str(r#"{"records":[{"fields":{"title":"x"}}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_record_ids_have_the_hosted_shape() {
        let id = new_record_id();
        assert!(id.starts_with("rec"));
        assert_eq!(id.len(), 17);
    }

    #[test]
    fn search_formula_parses_the_client_shape() {
        assert_eq!(
            parse_search_formula(r#"SEARCH("milk", title)"#),
            Some("milk")
        );
        assert_eq!(
            parse_search_formula(r#"SEARCH("say "hi"", title)"#),
            Some(r#"say "hi""#)
        );
        assert_eq!(parse_search_formula("NOT_A_FORMULA()"), None);
    }
}
