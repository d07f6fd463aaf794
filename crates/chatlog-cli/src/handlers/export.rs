use crate::args::ExportArgs;
use crate::types::OutputFormat;
use anyhow::Result;
use chatlog_engine::Verbosity;
use chatlog_runtime::{ExportRequest, ExportService, ExportTarget, Settings};
use serde_json::json;

pub fn handle(settings: &Settings, args: ExportArgs, format: OutputFormat) -> Result<()> {
    // Reject a bad path, sheet name or pattern before touching the network
    let mut target = ExportTarget::new(&args.output)?;
    if let Some(sheet_name) = args.sheet_name {
        target = target.with_sheet_name(sheet_name)?;
    }
    let request = ExportRequest {
        filter: args.filter.resolve()?,
        verbosity: if args.full {
            Verbosity::Full
        } else {
            Verbosity::Minimal
        },
    };

    let client = settings.client()?;
    let summary = ExportService::new(&client, &client).export(&request, &target)?;

    match format {
        OutputFormat::Json => {
            let report = json!({
                "path": target.path(),
                "format": target.format().to_string(),
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Plain => {
            println!(
                "Exported {} rows from {} sessions to {}",
                summary.rows,
                summary.sessions - summary.sessions_skipped,
                target.path().display()
            );
            if summary.sessions_skipped > 0 {
                println!(
                    "Skipped {} sessions with an unsupported agent category",
                    summary.sessions_skipped
                );
            }
            if summary.messages_dropped > 0 {
                println!(
                    "Dropped {} trailing messages that did not form a complete turn",
                    summary.messages_dropped
                );
            }
        }
    }

    Ok(())
}
