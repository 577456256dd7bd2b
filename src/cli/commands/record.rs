use chrono::{Local, NaiveDateTime};
use serde_json::{Map, Value};

use crate::adapters::store::jsonl_event_store::JsonLinesEventStore;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{LogError, Result};
use crate::core::models::auth_context::AuthContext;
use crate::core::models::event_record::{EventRecord, TIMESTAMP_FORMAT};
use crate::core::traits::event_store::EventSink;

/// Request-level data for `adminlog record`, apart from the actor.
#[derive(Debug)]
pub struct RecordOptions<'a> {
    pub action: &'a str,
    pub ip: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub details: &'a [String],
    pub at: Option<&'a str>,
}

/// Execute the `adminlog record` command.
///
/// Appends one event on behalf of `auth`. The actor's role is kept in
/// the details under `actor_role`.
pub fn execute(config: &AppConfig, auth: &AuthContext, opts: &RecordOptions<'_>) -> Result<()> {
    let record = build_record(auth, opts)?;

    let store = JsonLinesEventStore::from_config(context::data_dir(), config.store.as_ref());
    store.append(&record)?;
    tracing::debug!(path = %store.path().display(), user = ?record.user_id, "record appended");

    output::success(&format!(
        "Recorded {} at {}",
        record.action,
        record.timestamp.format(TIMESTAMP_FORMAT)
    ));
    Ok(())
}

/// Turn command-line input into a record ready to append.
pub fn build_record(auth: &AuthContext, opts: &RecordOptions<'_>) -> Result<EventRecord> {
    let action = opts.action.trim();
    if action.is_empty() {
        return Err(LogError::InvalidArgument {
            detail: "action must not be empty".into(),
        });
    }

    let timestamp = match opts.at {
        Some(raw) => parse_timestamp(raw)?,
        None => Local::now().naive_local(),
    };

    let mut details = Map::new();
    for raw in opts.details {
        let (key, value) = parse_detail(raw)?;
        details.insert(key, value);
    }
    details
        .entry("actor_role")
        .or_insert_with(|| Value::String(auth.role.to_string()));

    let mut record = EventRecord::new(timestamp, action);
    record.user_id = auth.user_id.clone();
    record.ip_address = opts.ip.map(str::to_string);
    record.user_agent = opts.user_agent.map(str::to_string);
    record.details = Some(details);
    Ok(record)
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        LogError::InvalidDate {
            value: raw.to_string(),
            expected: "YYYY-MM-DD HH:MM:SS, e.g. 2024-01-15 13:45:00",
        }
    })
}

/// Split `KEY=VALUE`. The value keeps its JSON type when it parses as
/// JSON (numbers, booleans, objects); anything else is a string.
fn parse_detail(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(LogError::InvalidArgument {
            detail: format!("detail must be KEY=VALUE, got '{raw}'"),
        });
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(LogError::InvalidArgument {
            detail: format!("detail key is empty in '{raw}'"),
        });
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
