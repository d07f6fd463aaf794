use crate::types::LogLevel;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CHATLOG_LOG";

/// Install the stderr subscriber.
///
/// `CHATLOG_LOG` takes a full filter directive and wins over `--log-level`.
pub fn init(level: LogLevel) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => directive.parse::<EnvFilter>().unwrap_or_else(|e| {
            eprintln!(
                "WARN: {}='{}' is not a valid tracing filter ({}); falling back to '{}'",
                LOG_ENV, directive, e, level
            );
            EnvFilter::new(level.to_string())
        }),
        Err(_) => EnvFilter::new(level.to_string()),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
