use super::common::FilterArgs;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Flatten sessions into a CSV or XLSX table")]
    Export(ExportArgs),

    #[command(about = "Inspect and delete sessions")]
    Sessions {
        #[command(subcommand)]
        command: SessionsCommand,
    },

    #[command(about = "Inspect and delete agents")]
    Agents {
        #[command(subcommand)]
        command: AgentsCommand,
    },
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(
        long,
        short,
        help = "Output file; the extension (.csv or .xlsx) selects the format"
    )]
    pub output: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[arg(long, help = "Include agent type, category, description, source text and session name")]
    pub full: bool,

    #[arg(long, help = "Worksheet name for .xlsx output [default: today's date]")]
    pub sheet_name: Option<String>,
}

#[derive(Subcommand)]
pub enum SessionsCommand {
    #[command(about = "List sessions in directory order")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Sort by creation time")]
        sorted: bool,
    },

    #[command(about = "Show one session with its messages")]
    Show {
        #[arg(help = "Session ID")]
        id: String,
    },

    #[command(about = "Delete a session")]
    Delete {
        #[arg(help = "Session ID")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum AgentsCommand {
    #[command(about = "List agents")]
    List,

    #[command(about = "Show one agent")]
    Show {
        #[arg(help = "Agent ID")]
        id: String,
    },

    #[command(about = "Delete an agent")]
    Delete {
        #[arg(help = "Agent ID")]
        id: String,
    },
}
