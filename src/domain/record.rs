//! Records and the fields the hierarchy logic interprets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::key::NodeKey;

/// A flat record: an opaque JSON object supplied by the caller.
pub type Record = Map<String, Value>;

pub const DEFAULT_ID_FIELD: &str = "id";
pub const DEFAULT_PARENT_FIELD: &str = "parent_id";

/// Names of the identifier and parent-identifier fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub id: String,
    pub parent: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID_FIELD.to_string(),
            parent: DEFAULT_PARENT_FIELD.to_string(),
        }
    }
}

impl FieldNames {
    pub fn new(id: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
        }
    }

    /// Identifier of the record at `position`.
    pub fn id_of(&self, record: &Record, position: usize) -> DomainResult<NodeKey> {
        let value = field(record, &self.id, position)?;
        key_of(value, &self.id, position)
    }

    /// Parent identifier of the record at `position`; `None` marks the root.
    pub fn parent_of(&self, record: &Record, position: usize) -> DomainResult<Option<NodeKey>> {
        match field(record, &self.parent, position)? {
            Value::Null => Ok(None),
            value => key_of(value, &self.parent, position).map(Some),
        }
    }
}

fn field<'a>(record: &'a Record, name: &str, position: usize) -> DomainResult<&'a Value> {
    record.get(name).ok_or_else(|| DomainError::MissingField {
        position,
        field: name.to_string(),
    })
}

fn key_of(value: &Value, name: &str, position: usize) -> DomainResult<NodeKey> {
    NodeKey::from_value(value).ok_or_else(|| DomainError::InvalidKey {
        position,
        field: name.to_string(),
        value: value.to_string(),
    })
}
