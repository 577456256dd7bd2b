pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

use crate::core::models::auth_context::Role;

/// Activity log viewer for the restaurant back-office.
#[derive(Parser, Debug)]
#[command(name = "adminlog", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding config.toml and the activity log
    #[arg(long, global = true, env = "ADMINLOG_DIR")]
    pub dir: Option<String>,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of the activity log, newest first
    List {
        /// Case-insensitive text search over action, user, IP and details
        #[arg(long)]
        search: Option<String>,
        /// Only show this exact action
        #[arg(long)]
        action: Option<String>,
        /// Only show entries on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Only show entries on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
        /// Entries per page (default from config.toml, else 50)
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i64>,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct actions present in the log
    Actions,

    /// Append an entry to the activity log
    Record {
        /// Action identifier, e.g. menu_created
        #[arg(long)]
        action: String,
        /// Acting user id (omit for system events)
        #[arg(long)]
        user: Option<String>,
        /// Role of the acting user
        #[arg(long, default_value_t = Role::Staff)]
        role: Role,
        /// Client IP address
        #[arg(long)]
        ip: Option<String>,
        /// Client user agent
        #[arg(long)]
        user_agent: Option<String>,
        /// Extra detail as KEY=VALUE. Repeat for more.
        #[arg(long = "detail", value_name = "KEY=VALUE")]
        details: Vec<String>,
        /// Event time as "YYYY-MM-DD HH:MM:SS" (default: now)
        #[arg(long)]
        at: Option<String>,
    },
}
