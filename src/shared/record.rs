//! Opaque entity records and the two response payload shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entity record as returned by the API: an opaque JSON object.
///
/// The SDK does not model endpoint-specific fields. Only `id` and the
/// `title`/`name` label fields are interpreted, for cache keys and
/// by-name lookups; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field access.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The numeric `id` field, if present.
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    /// The `title` field (experiments, categories, statuses, tags).
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// The `name` field (teams).
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// True when the body is the API's payload-encoded not-found marker:
    /// a 2xx response whose JSON object carries `"code": 404`.
    pub fn is_not_found(&self) -> bool {
        self.0.get("code").and_then(Value::as_i64) == Some(404)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

/// Response body shape at the transport boundary.
///
/// List endpoints return arrays; single-resource endpoints return one
/// object. The ambiguity stops here — callers past this point always
/// see a `Vec<Record>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Many(Vec<Record>),
    One(Record),
}

impl Payload {
    /// Normalize to "always a list": a single object becomes a
    /// one-element list, a list passes through unchanged.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Payload::Many(records) => records,
            Payload::One(record) => vec![record],
        }
    }
}
