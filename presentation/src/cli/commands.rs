//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for orchestration results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Response plus every node's structured output
    Full,
    /// Only the audited response
    Response,
    /// The complete result as JSON
    Json,
}

/// CLI arguments for symptom-council
#[derive(Parser, Debug)]
#[command(name = "symptom-council")]
#[command(author, version, about = "A council of model nodes for symptom journaling")]
#[command(long_about = r#"
symptom-council answers one message with a small council of model nodes.

The leader node (yapper by default) extracts structured facts and writes the
reply. Supporting nodes then run concurrently:
  definer   explains medical terms
  redditor  finds related community threads in the local search index
  engager   drafts a message (only when drafting is requested)
The auditor reviews the merged text before it is returned.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/symptom-council/config.toml   Global config

Example:
  symptom-council "I've had cramping and mood swings for 10 days"
  symptom-council -n definer -e redditor "what is the luteal phase?"
  symptom-council --search "luteal rage"
  symptom-council --chat --session today
"#)]
pub struct Cli {
    /// The message to send (not required in chat or search mode)
    pub message: Option<String>,

    /// Node leading the turn (yapper, definer, redditor, engager, auditor)
    #[arg(short, long, value_name = "NODE", default_value = "yapper")]
    pub node: String,

    /// Supporting nodes allowed to run (can be specified multiple times)
    #[arg(short, long, value_name = "NODE")]
    pub enable: Vec<String>,

    /// Model for every node (overrides [models] default)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Explicit query for the thread finder
    #[arg(long, value_name = "QUERY")]
    pub search_query: Option<String>,

    /// Search the local thread index and exit
    #[arg(long, value_name = "QUERY", conflicts_with = "chat")]
    pub search: Option<String>,

    /// Save the response into a bucket (journal, definitions, threads, drafts, audit_logs)
    #[arg(long, value_name = "BUCKET")]
    pub save_to: Option<String>,

    /// Session id for history and saved items
    #[arg(long, value_name = "ID", default_value = "default")]
    pub session: String,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// List node identities and exit
    #[arg(long)]
    pub list_nodes: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "response")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append orchestration events to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
