//! filtersearch CLI
//!
//! Ranks a JSON file of items against a query:
//! - `search` prints ranked results as markdown or JSON
//! - `fields` prints the filter names usable as field hints
//! - `config` prints the resolved configuration, `config --init` writes it

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use filtersearch::cli::{Cli, Commands};
use filtersearch::config::{config_path, load_config};
use filtersearch::{commands, SearchError};

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Search(args) => commands::execute_search(&args, &config),
        Commands::Fields(args) => commands::execute_fields(&args, &config),
        Commands::Config(args) => {
            let path = match cli.config {
                Some(path) => path,
                None => config_path()?,
            };
            commands::execute_config(&args, &path, &config)
        }
    }
}

/// Map an error to a process exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(search_err) = err.downcast_ref::<SearchError>() {
        return search_err.exit_code();
    }
    match err.root_cause().downcast_ref::<std::io::Error>() {
        Some(io) if io.kind() == std::io::ErrorKind::NotFound => 3,
        _ if err.root_cause().is::<serde_json::Error>() => 1,
        _ => 5,
    }
}
