//! JSON encoding of record sequences.

use serde_json::Value;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Record;

/// Decode a JSON array of objects.
pub fn decode_records(input: &str) -> ApplicationResult<Vec<Record>> {
    let value: Value = serde_json::from_str(input).map_err(ApplicationError::Decode)?;
    let Value::Array(items) = value else {
        return Err(ApplicationError::NotAnArray {
            found: type_name(&value),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(ApplicationError::NotAnObject {
                position,
                found: type_name(&other),
            }),
        })
        .collect()
}

/// Encode records as a JSON array, compact or pretty-printed.
pub fn encode_records(records: &[Record], pretty: bool) -> ApplicationResult<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };
    encoded.map_err(ApplicationError::Encode)
}

/// Re-indent arbitrary JSON text for display.
pub fn pretty_print(input: &str) -> ApplicationResult<String> {
    let value: Value = serde_json::from_str(input).map_err(ApplicationError::Decode)?;
    serde_json::to_string_pretty(&value).map_err(ApplicationError::Encode)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_array_of_objects_when_decoding_then_keeps_all_fields() {
        let records = decode_records(r#"[{"id": 1, "parent_id": null, "name": "root"}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "root");
    }

    #[test]
    fn given_object_when_decoding_then_not_an_array() {
        let err = decode_records(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, ApplicationError::NotAnArray { found: "object" }));
    }

    #[test]
    fn given_scalar_element_when_decoding_then_not_an_object() {
        let err = decode_records(r#"[{"id": 1, "parent_id": null}, 7]"#).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::NotAnObject {
                position: 1,
                found: "number"
            }
        ));
    }

    #[test]
    fn given_garbage_when_decoding_then_decode_error() {
        assert!(matches!(
            decode_records("[{"),
            Err(ApplicationError::Decode(_))
        ));
    }

    #[test]
    fn given_records_when_encoding_compact_then_single_line() {
        let records = decode_records(r#"[{"id": 1, "parent_id": null}]"#).unwrap();
        let encoded = encode_records(&records, false).unwrap();
        assert_eq!(encoded, r#"[{"id":1,"parent_id":null}]"#);
        assert!(encode_records(&records, true).unwrap().contains('\n'));
    }
}
