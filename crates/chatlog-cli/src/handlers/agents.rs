use crate::types::OutputFormat;
use anyhow::Result;
use chatlog_client::ApiClient;
use chatlog_types::Agent;

pub fn list(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let agents = client.agents().list()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&agents)?),
        OutputFormat::Plain => {
            if agents.is_empty() {
                println!("No agents found.");
            }
            for agent in &agents {
                println!(
                    "{}  {:<8}  {}",
                    agent.id,
                    category_label(agent),
                    agent.name
                );
            }
        }
    }
    Ok(())
}

pub fn show(client: &ApiClient, id: &str, format: OutputFormat) -> Result<()> {
    let agent = client.agents().get(id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&agent)?),
        OutputFormat::Plain => {
            let context = &agent.context;
            println!("Agent:       {}", agent.id);
            println!("Name:        {}", agent.name);
            println!("Type:        {}", agent.agent_type);
            println!("Category:    {}", category_label(&agent));
            println!(
                "Description: {}",
                context.description.as_deref().unwrap_or("-")
            );
            println!(
                "RAG dataset: {}",
                context.rag_dataset_id.as_deref().unwrap_or("-")
            );
            if let Some(source_text) = &context.source_text {
                println!("\n{}", source_text);
            }
        }
    }
    Ok(())
}

pub fn delete(client: &ApiClient, id: &str) -> Result<()> {
    client.agents().delete(id)?;
    println!("Deleted agent {}", id);
    Ok(())
}

fn category_label(agent: &Agent) -> &str {
    agent.context.category.as_deref().unwrap_or("-")
}
