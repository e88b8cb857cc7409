use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parse, normalize and combine vulnerability-management filter strings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file with default filters
    #[arg(short, long, global = true, env = "GMP_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the terms of a filter
    Parse {
        /// Filter string
        filter: String,
    },
    /// Print a filter in canonical form
    Normalize {
        /// Filter string
        filter: String,
    },
    /// Join two filters with a connective
    Combine {
        left: String,
        right: String,
        /// Use `or` instead of `and`
        #[arg(long)]
        or: bool,
    },
    /// Set a keyword, replacing any existing value
    Set {
        filter: String,
        keyword: String,
        value: String,
        /// Relation between keyword and value
        #[arg(short, long, default_value = "=")]
        relation: String,
    },
    /// Remove every term of a keyword
    Delete { filter: String, keyword: String },
    /// Move a filter to another page
    Page(PageArgs),
    /// Show the default filter for a resource type
    Defaults {
        /// Resource type, e.g. task or result
        resource_type: String,
        /// Filter to complete with the default's paging and sorting
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("direction").required(true).args(["next", "previous", "first", "all"])))]
pub struct PageArgs {
    pub filter: String,
    #[arg(long)]
    pub next: bool,
    #[arg(long)]
    pub previous: bool,
    #[arg(long)]
    pub first: bool,
    /// Request all rows
    #[arg(long)]
    pub all: bool,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
