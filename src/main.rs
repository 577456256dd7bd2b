mod adapters;
mod cli;
mod config;
mod core;
mod logging;

use clap::Parser;

use cli::commands::list::ListOptions;
use cli::commands::record::RecordOptions;
use cli::{Cli, Commands};
use config::app_config::{AppConfig, LogLevel};
use crate::core::errors::Result;
use crate::core::models::auth_context::AuthContext;

fn main() {
    let args = Cli::parse();

    cli::context::init(args.dir.as_deref());
    cli::output::set_quiet(args.quiet);

    if let Err(e) = run(&args) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = AppConfig::load(cli::context::data_dir())?;

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log_level()
    };
    logging::init_logging(level, config.log_format());

    match &args.command {
        Commands::List {
            search,
            action,
            from,
            to,
            page,
            page_size,
            json,
        } => cli::commands::list::execute(
            &config,
            &ListOptions {
                search: search.as_deref(),
                action: action.as_deref(),
                from: from.as_deref(),
                to: to.as_deref(),
                page: *page,
                page_size: *page_size,
                json: *json,
            },
        ),
        Commands::Actions => cli::commands::actions::execute(&config),
        Commands::Record {
            action,
            user,
            role,
            ip,
            user_agent,
            details,
            at,
        } => {
            let auth = AuthContext::new(user.clone(), *role);
            cli::commands::record::execute(
                &config,
                &auth,
                &RecordOptions {
                    action,
                    ip: ip.as_deref(),
                    user_agent: user_agent.as_deref(),
                    details,
                    at: at.as_deref(),
                },
            )
        }
    }
}
