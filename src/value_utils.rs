use serde_json::Value;

use crate::models::{Operator, OperatorAddon};

/// Lossy string view of a JSON value. Missing and null become empty.
pub fn value_to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(boolean)) => boolean.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => {
            serde_json::to_string(other).unwrap_or_default()
        }
    }
}

/// Only a literal JSON `true` counts as true. Truthy stand-ins such as `"yes"`
/// or `1` read as false, so a record that failed validation never shows up
/// under the working filter on the strength of a mistyped flag.
pub fn value_to_flag(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// Best-effort conversion of an unvalidated record into the typed shape.
pub trait FromRawRecord: Sized {
    fn from_raw(value: &Value) -> Self;
}

impl FromRawRecord for Operator {
    fn from_raw(value: &Value) -> Self {
        Operator {
            id: value_to_text(value.get("id")),
            name: value_to_text(value.get("name")),
            avatar: value_to_text(value.get("avatar")),
            is_working: value_to_flag(value.get("isWorking")),
            created_at: value_to_text(value.get("createdAt")),
        }
    }
}

impl FromRawRecord for OperatorAddon {
    fn from_raw(value: &Value) -> Self {
        OperatorAddon {
            id: value_to_text(value.get("id")),
            field_name: value_to_text(value.get("fieldName")),
            text: value_to_text(value.get("text")),
            is_checked: value_to_flag(value.get("isChecked")),
        }
    }
}
