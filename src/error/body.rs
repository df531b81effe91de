//! Backend error body parsing.
//!
//! The backend reports failures as `{"detail": ...}`, `{"message": ...}`,
//! `{"error": ...}`, or a map of field name to message list, with
//! `non_field_errors` for form-level problems.

use serde_json::Value;
use std::collections::BTreeMap;

/// Key the backend uses for errors not tied to a field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Message and per-field errors extracted from an error response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    /// Parse an error body; falls back to the raw text, then to `fallback`.
    pub fn parse(body: &[u8], fallback: &str) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(_) => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                return Self {
                    message: if text.is_empty() || text.starts_with('<') {
                        fallback.to_string()
                    } else {
                        text
                    },
                    fields: BTreeMap::new(),
                };
            }
        };

        let mut fields = BTreeMap::new();
        let mut message = None;

        match &value {
            Value::Object(map) => {
                for key in ["detail", "message", "error"] {
                    if let Some(text) = map.get(key).and_then(Value::as_str) {
                        message = Some(text.to_string());
                        break;
                    }
                }
                for (key, v) in map {
                    if matches!(key.as_str(), "detail" | "message" | "error") {
                        continue;
                    }
                    let messages = collect_messages(v);
                    if !messages.is_empty() {
                        fields.insert(key.clone(), messages);
                    }
                }
            }
            other => {
                let messages = collect_messages(other);
                message = messages.into_iter().next();
            }
        }

        let message = message
            .or_else(|| {
                fields
                    .get(NON_FIELD_ERRORS)
                    .and_then(|m| m.first().cloned())
            })
            .or_else(|| {
                fields
                    .iter()
                    .next()
                    .and_then(|(k, m)| m.first().map(|first| format!("{}: {}", k, first)))
            })
            .unwrap_or_else(|| fallback.to_string());

        Self { message, fields }
    }
}

fn collect_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(collect_messages).collect(),
        Value::Object(map) => map.values().flat_map(collect_messages).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
