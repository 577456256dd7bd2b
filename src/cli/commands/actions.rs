use crate::adapters::store::jsonl_event_store::JsonLinesEventStore;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::query_engine::QueryEngine;

/// Execute the `adminlog actions` command.
///
/// Lists every distinct action in the log, alphabetically. These are the
/// values accepted by `list --action`.
pub fn execute(config: &AppConfig) -> Result<()> {
    let store = JsonLinesEventStore::from_config(context::data_dir(), config.store.as_ref());
    let actions = QueryEngine.distinct_actions(&store)?;

    if actions.is_empty() {
        output::header("Actions");
        output::warning("No log entries found");
        return Ok(());
    }

    output::header(&format!("Actions ({})", actions.len()));
    for action in &actions {
        println!("  {action}");
    }

    Ok(())
}
