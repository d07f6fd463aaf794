use crate::args::FilterArgs;
use crate::types::OutputFormat;
use anyhow::Result;
use chatlog_client::ApiClient;
use chatlog_types::Session;

pub fn list(
    client: &ApiClient,
    filter: &FilterArgs,
    sorted: bool,
    format: OutputFormat,
) -> Result<()> {
    let filter = filter.resolve()?;
    let sessions = if sorted {
        filter.apply(client.sessions().list_sorted()?)
    } else {
        client.sessions().list_filtered(&filter)?
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
        OutputFormat::Plain => {
            if sessions.is_empty() {
                println!("No sessions found.");
            }
            for session in &sessions {
                println!("{}", summary_line(session));
            }
        }
    }
    Ok(())
}

pub fn show(client: &ApiClient, id: &str, format: OutputFormat) -> Result<()> {
    let mut session = client.sessions().get(id)?;
    if session.messages.is_empty() {
        session.messages = client.sessions().messages(id)?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Plain => {
            println!("Session:  {}", session.id);
            println!("Name:     {}", session.name.as_deref().unwrap_or("-"));
            println!("Created:  {}", session.created_at.to_rfc3339());
            println!(
                "User:     {}",
                session.created_user_name.as_deref().unwrap_or("-")
            );
            println!("Agent:    {}", session.agent_id);
            if let Some(feedback) = session.feedback_text() {
                println!("Feedback: {}", feedback);
            }
            println!();
            for message in &session.messages {
                println!(
                    "[{}] {}: {}",
                    message.timestamp.to_rfc3339(),
                    message.role,
                    message.text
                );
            }
        }
    }
    Ok(())
}

pub fn delete(client: &ApiClient, id: &str) -> Result<()> {
    client.sessions().delete(id)?;
    println!("Deleted session {}", id);
    Ok(())
}

fn summary_line(session: &Session) -> String {
    format!(
        "{}  {}  {:<16}  agent={}  messages={}",
        session.id,
        session.created_at.to_rfc3339(),
        session.created_user_name.as_deref().unwrap_or("-"),
        session.agent_id,
        session.messages.len()
    )
}
