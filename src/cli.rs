//! CLI mode implementation
//!
//! Provides the command-line interface for ranking JSON items

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::search::Strategy;

/// filtersearch CLI
#[derive(Parser, Debug)]
#[command(name = "filtersearch")]
#[command(about = "Rank JSON items against a free-text query", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank items from a JSON file against a query
    Search(SearchArgs),
    /// List the filter names usable as field hints
    Fields(FieldsArgs),
    /// Show the resolved configuration
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Any,
    Every,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Any => Strategy::Any,
            StrategyArg::Every => Strategy::Every,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Search command arguments
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// JSON file holding an array of items
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// Search terms (case-insensitive); empty lists every item
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,

    /// Whether every token or any token must match
    #[arg(short = 's', long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Maximum number of results
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Treat items as project settings (id, name, description)
    #[arg(long)]
    pub settings: bool,
}

/// Fields command arguments
#[derive(Parser, Debug, Clone)]
pub struct FieldsArgs {
    /// Use the project settings filters instead of the configured ones
    #[arg(long)]
    pub settings: bool,
}

/// Config command arguments
#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    /// Write the default configuration if no config file exists yet
    #[arg(long)]
    pub init: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "filtersearch",
            "search",
            "--file",
            "items.json",
            "-q",
            "con create",
            "--strategy",
            "any",
            "--limit",
            "10",
        ])
        .unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.file, PathBuf::from("items.json"));
        assert_eq!(args.query, "con create");
        assert_eq!(args.strategy, Some(StrategyArg::Any));
        assert_eq!(args.limit, Some(10));
        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(!args.settings);
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["filtersearch", "search", "-f", "x.json"]).unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query, "");
        assert_eq!(args.strategy, None);
        assert_eq!(args.limit, None);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "filtersearch",
            "fields",
            "--settings",
            "--verbose",
            "--config",
            "/tmp/c.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert!(matches!(cli.command, Commands::Fields(FieldsArgs { settings: true })));
    }

    #[test]
    fn test_config_init_flag() {
        let cli = Cli::try_parse_from(["filtersearch", "config", "--init"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigArgs { init: true })));

        let cli = Cli::try_parse_from(["filtersearch", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigArgs { init: false })));
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        let result = Cli::try_parse_from([
            "filtersearch",
            "search",
            "-f",
            "x.json",
            "--strategy",
            "some",
        ]);
        assert!(result.is_err());
    }
}
