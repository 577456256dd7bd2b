use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::{LogError, Result};

/// On-disk timestamp layout, in local wall-clock time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single entry in the activity log (JSON lines format).
///
/// Records are immutable once written. `user_id` being absent means the
/// event was initiated by the system rather than a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub action: String,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(
        default,
        deserialize_with = "object_or_empty_array",
        skip_serializing_if = "Option::is_none"
    )]
    pub details: Option<Map<String, Value>>,
}

impl EventRecord {
    /// Build a record with only the required fields set.
    pub fn new(timestamp: NaiveDateTime, action: impl Into<String>) -> Self {
        Self {
            timestamp,
            action: action.into(),
            user_id: None,
            ip_address: None,
            user_agent: None,
            details: None,
        }
    }

    /// Parse one line of the store.
    ///
    /// Returns `Ok(None)` for blank lines, which are neither records nor
    /// malformed. `line_number` is 1-based and only used for diagnostics.
    pub fn parse_line(raw: &str, line_number: usize) -> Result<Option<Self>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| LogError::MalformedRecord {
                line: line_number,
                detail: e.to_string(),
            })
    }

    /// Serialize as one compact JSON line, without the trailing newline.
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| LogError::StorageWriteFailed {
            detail: format!("Failed to serialize log record: {e}"),
        })
    }

    /// Compact serialization of `details`, `{}` when absent.
    ///
    /// serde_json keeps object keys sorted, so a fragment spanning several
    /// keys only matches in sorted-key order, not in the order the writer
    /// put them in the file.
    pub fn details_json(&self) -> String {
        match &self.details {
            Some(map) => Value::Object(map.clone()).to_string(),
            None => "{}".to_string(),
        }
    }

    /// Lowercased text the free-text search runs against: action, user id,
    /// IP address and serialized details, concatenated in that order.
    pub fn search_haystack(&self) -> String {
        let mut text = String::with_capacity(64);
        text.push_str(&self.action);
        text.push_str(self.user_id.as_deref().unwrap_or(""));
        text.push_str(self.ip_address.as_deref().unwrap_or(""));
        text.push_str(&self.details_json());
        text.to_lowercase()
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        ts: &NaiveDateTime,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}"))
        })
    }
}

/// The PHP write side emits numeric user ids; store them as strings.
fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "user_id must be a string or number, got {other}"
        ))),
    }
}

/// PHP's `json_encode([])` writes an empty payload as `[]`; treat it as
/// no details. Any other non-object value is rejected.
fn object_or_empty_array<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Map<String, Value>>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(other) => Err(serde::de::Error::custom(format!(
            "details must be an object, got {other}"
        ))),
    }
}
