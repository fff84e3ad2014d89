use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use sqlx::types::Json;
use thiserror::Error;
use uuid::Uuid;

/// A stored JSON document body, without its identity
pub type Document = Map<String, Value>;

/// Name of the identity field in documents returned to clients
pub const ID_FIELD: &str = "_id";

/// Raised when an identifier string is not a well-formed document id
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid identifier: {0}")]
pub struct InvalidIdentifier(pub String);

/// Identity of a job document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl FromStr for JobId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(JobId)
            .map_err(|_| InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a job application document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ApplicationId(pub Uuid);

impl FromStr for ApplicationId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(ApplicationId)
            .map_err(|_| InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Database representation of a stored document
#[derive(Debug, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub doc: Json<Document>,
}

impl DocumentRow {
    /// Flatten into the client-facing shape: `_id` followed by the stored
    /// fields in `jsonb` key order
    pub fn into_document(self) -> Document {
        let mut document = Map::with_capacity(self.doc.0.len() + 1);
        document.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        for (key, value) in self.doc.0 {
            if key != ID_FIELD {
                document.insert(key, value);
            }
        }
        document
    }
}

/// Strip a client-supplied identity before the payload is stored
pub fn into_stored_body(mut payload: Document) -> Document {
    payload.remove(ID_FIELD);
    payload
}

/// Acknowledgment returned for a single insert
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertAck {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Acknowledgment returned for a single-document update
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Uuid>,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_id_rejects_malformed_text() {
        assert!("not-an-id".parse::<JobId>().is_err());
        assert!("".parse::<JobId>().is_err());

        let id = Uuid::new_v4();
        assert_eq!(id.to_string().parse::<JobId>(), Ok(JobId(id)));
    }

    #[test]
    fn document_row_places_id_first_and_ignores_stored_id() {
        let id = Uuid::new_v4();
        let doc = json!({"_id": "spoofed", "title": "Rust engineer", "location": "Dhaka"});
        let row = DocumentRow {
            id,
            doc: Json(doc.as_object().cloned().unwrap_or_default()),
        };

        let document = row.into_document();
        let keys: Vec<&str> = document.keys().map(String::as_str).collect();
        assert_eq!(keys[0], "_id");
        assert_eq!(document["_id"], json!(id.to_string()));
        assert_eq!(document["title"], json!("Rust engineer"));
    }

    #[test]
    fn acknowledgments_use_camel_case() {
        let id = Uuid::new_v4();
        assert_eq!(
            serde_json::to_value(InsertAck::new(id)).unwrap(),
            json!({"acknowledged": true, "insertedId": id.to_string()})
        );
        assert_eq!(
            serde_json::to_value(UpdateAck::new(1, 0)).unwrap(),
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 0,
                "upsertedCount": 0,
                "upsertedId": null
            })
        );
    }
}
