// NOTE: Command organization
//
// `export` is the main workflow and stays top level.
// `sessions` and `agents` are namespaced inspection/cleanup commands that
// mirror the two directories the export reads from.

mod commands;
mod common;

pub use commands::*;
pub use common::*;

use crate::types::{LogLevel, OutputFormat};
use clap::Parser;

#[derive(Parser)]
#[command(name = "chatlog")]
#[command(
    about = "Export agent chat-session transcripts as CSV or XLSX tables",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "API origin (env: CHATLOG_ORIGIN)")]
    pub origin: Option<String>,

    #[arg(long, global = true, help = "Basic auth user id (env: CHATLOG_USER_ID)")]
    pub user_id: Option<String>,

    #[arg(long, global = true, help = "Basic auth password (env: CHATLOG_PASSWORD)")]
    pub password: Option<String>,

    #[arg(long, global = true, help = "Project id (env: CHATLOG_PROJECT_ID)")]
    pub project_id: Option<String>,

    #[arg(long, global = true, help = "Config file path (env: CHATLOG_CONFIG)")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "HTTP request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
