use chrono::NaiveDate;
use colored::Colorize;
use std::path::Path;

use crate::adapters::directory::toml_user_directory::TomlUserDirectory;
use crate::adapters::store::jsonl_event_store::JsonLinesEventStore;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{LogError, Result};
use crate::core::models::event_record::EventRecord;
use crate::core::models::query::{FilterSpec, PageRequest, QueryResult};
use crate::core::services::actor_resolver::ActorResolver;
use crate::core::services::query_engine::QueryEngine;

/// Options for `adminlog list`, as given on the command line.
#[derive(Debug)]
pub struct ListOptions<'a> {
    pub search: Option<&'a str>,
    pub action: Option<&'a str>,
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
    pub page: i64,
    pub page_size: Option<i64>,
    pub json: bool,
}

/// Execute the `adminlog list` command.
///
/// Reads the whole log, applies the filters, and renders the requested
/// page with actor names resolved from the user directory.
pub fn execute(config: &AppConfig, opts: &ListOptions<'_>) -> Result<()> {
    let data_dir = context::data_dir();
    let store = JsonLinesEventStore::from_config(data_dir, config.store.as_ref());

    let filter = FilterSpec::new(
        opts.search,
        opts.action,
        opts.from.map(parse_date).transpose()?,
        opts.to.map(parse_date).transpose()?,
    );
    let page_size = opts
        .page_size
        .unwrap_or_else(|| i64::try_from(config.page_size()).unwrap_or(i64::MAX));
    let page = PageRequest::new(opts.page, page_size)?;

    let result = QueryEngine.query_source(&store, &filter, page)?;
    tracing::debug!(
        total = result.total_count,
        page = result.page,
        shown = result.records.len(),
        "activity log query finished"
    );

    if opts.json {
        let json = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{json}");
        return Ok(());
    }

    if result.records.is_empty() {
        output::header("Activity log");
        output::warning("No log entries found");
        if result.total_count > 0 {
            output::hint(&format!(
                "Page {} is past the last page ({}).",
                result.page, result.total_pages
            ));
        } else if !filter.is_empty() {
            output::hint("Try removing filters to see all entries.");
        }
        return Ok(());
    }

    let directory = load_directory(&data_dir.join(config.users_file()));
    let mut actors = ActorResolver::new(&directory);

    output::header(&format!("Activity log ({} entries)", result.total_count));
    println!();

    for record in &result.records {
        let actor = actors.resolve(record.user_id.as_deref());
        print_entry(record, &actor);
    }

    print_footer(&result);
    Ok(())
}

/// Load the user directory for actor names.
///
/// An unreadable or malformed directory only degrades names to
/// `User #<id>`; it never hides the log itself.
fn load_directory(path: &Path) -> TomlUserDirectory {
    match TomlUserDirectory::load(path) {
        Ok(directory) => {
            tracing::debug!(users = directory.len(), "loaded user directory");
            directory
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "user directory unreadable, showing raw user ids");
            TomlUserDirectory::default()
        }
    }
}

/// Parse a `YYYY-MM-DD` filter bound.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| LogError::InvalidDate {
        value: s.to_string(),
        expected: "YYYY-MM-DD, e.g. 2024-01-15",
    })
}

/// Print a single log entry as a formatted row.
fn print_entry(record: &EventRecord, actor: &str) {
    let date = record.timestamp.format("%Y-%m-%d %H:%M:%S");
    let ip = record.ip_address.as_deref().unwrap_or("-");
    let details = match &record.details {
        Some(map) if !map.is_empty() => record.details_json(),
        _ => String::new(),
    };

    println!(
        "  {} {} {} {:<20} {:<15} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        format_action(&record.action),
        actor,
        ip.dimmed(),
        details.dimmed(),
    );
}

/// Color an action by its verb suffix, the way the admin pages badge them.
fn format_action(action: &str) -> String {
    let padded = format!("{action:<22}");
    if action.ends_with("_failed") || action.ends_with("_deleted") {
        padded.red().to_string()
    } else if action.ends_with("_created") || action.ends_with("_success") {
        padded.green().to_string()
    } else if action.ends_with("_updated") {
        padded.yellow().to_string()
    } else {
        padded.cyan().to_string()
    }
}

fn print_footer(result: &QueryResult) {
    println!();
    println!(
        "  Page {} of {} ({} entries)",
        result.page, result.total_pages, result.total_count
    );
}
