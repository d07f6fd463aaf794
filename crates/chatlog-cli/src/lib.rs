// NOTE: chatlog layering
//
// types   -> domain records (Agent, Session, Message, Turn, Category)
// client  -> blocking HTTP access to the agent and session directories
// engine  -> turn reconstruction and row aggregation, no I/O
// runtime -> configuration resolution, export orchestration, file writers
// cli     -> argument parsing, dispatch and terminal output

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod types;

pub use args::{AgentsCommand, Cli, Commands, ExportArgs, FilterArgs, SessionsCommand};
pub use commands::run;
