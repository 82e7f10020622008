//! Domain and wire types for the hosted record API.
//!
//! # Design
//! The API wraps everything in a `records` envelope and nests user data under
//! `fields`, so the wire DTOs here mirror that shape exactly while the rest of
//! the crate works with the flat [`Todo`]. `RecordFields` is shared between
//! requests and responses; on the response side its serde defaults implement
//! the normalization rule (absent `title` becomes `""`, absent `isCompleted`
//! becomes `false`). These types are defined independently from the
//! mock-server crate; integration tests catch schema drift.

use serde::{Deserialize, Serialize};

/// A single todo item as the application sees it.
///
/// `id` is assigned by the server on create and stable afterwards; the core
/// treats it as an opaque string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
}

/// The user-visible fields of a record, as stored in the hosted table.
///
/// Serialized in both request and response bodies. The server may omit fields
/// it considers unset, hence the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// One record in a response: server-assigned id plus fields.
///
/// Responses also carry server metadata such as `createdTime`; anything not
/// modeled here is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: RecordFields,
}

/// Response envelope for list and create operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPage {
    pub records: Vec<Record>,
}

/// Request payload for creating records: `{"records":[{"fields":{...}}]}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecords {
    pub records: Vec<CreateRecord>,
}

/// A single record to create. No id; the server assigns one.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecord {
    pub fields: RecordFields,
}

/// Request payload for updating records in place:
/// `{"records":[{"id":...,"fields":{...}}]}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRecords {
    pub records: Vec<UpdateRecord>,
}

/// A single record update, addressed by id. The full field set is sent; the
/// API treats this as a field-level merge, but this client always writes both
/// fields.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRecord {
    pub id: String,
    pub fields: RecordFields,
}

impl From<Record> for Todo {
    fn from(record: Record) -> Self {
        Todo {
            id: record.id,
            title: record.fields.title,
            is_completed: record.fields.is_completed,
        }
    }
}

impl Todo {
    /// The wire fields for this todo, used when writing it back to the server.
    pub(crate) fn to_fields(&self) -> RecordFields {
        RecordFields {
            title: self.title.clone(),
            is_completed: self.is_completed,
        }
    }
}
