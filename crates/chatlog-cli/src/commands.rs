use super::args::{AgentsCommand, Cli, Commands, SessionsCommand};
use super::handlers;
use anyhow::Result;
use chatlog_runtime::{Config, Overrides, Settings, resolve_config_path};

pub fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        show_guidance();
        return Ok(());
    };

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;
    let overrides = Overrides {
        origin: cli.origin,
        user_id: cli.user_id,
        password: cli.password,
        project_id: cli.project_id,
        timeout_secs: cli.timeout_secs,
    };
    let settings = Settings::resolve(&overrides, &config)?;
    tracing::debug!(?settings, config = %config_path.display(), "Resolved settings");

    let format = cli.format;

    match command {
        Commands::Export(args) => handlers::export::handle(&settings, args, format),

        Commands::Sessions { command } => {
            let client = settings.client()?;
            match command {
                SessionsCommand::List { filter, sorted } => {
                    handlers::sessions::list(&client, &filter, sorted, format)
                }
                SessionsCommand::Show { id } => handlers::sessions::show(&client, &id, format),
                SessionsCommand::Delete { id } => handlers::sessions::delete(&client, &id),
            }
        }

        Commands::Agents { command } => {
            let client = settings.client()?;
            match command {
                AgentsCommand::List => handlers::agents::list(&client, format),
                AgentsCommand::Show { id } => handlers::agents::show(&client, &id, format),
                AgentsCommand::Delete { id } => handlers::agents::delete(&client, &id),
            }
        }
    }
}

fn show_guidance() {
    println!("chatlog - Export agent chat-session transcripts\n");

    println!("Connection (flag, environment variable, or config file):");
    println!("  --origin       CHATLOG_ORIGIN       (default http://localhost:8000)");
    println!("  --user-id      CHATLOG_USER_ID      (default admin)");
    println!("  --password     CHATLOG_PASSWORD");
    println!("  --project-id   CHATLOG_PROJECT_ID\n");

    println!("Quick commands:");
    println!("  chatlog export --output chats.xlsx     # Export every session");
    println!("  chatlog export --output chats.csv --full --start 2024-11-24T00:00:00+09:00");
    println!("  chatlog sessions list --sorted         # Browse sessions");
    println!("  chatlog agents list                    # Browse agents\n");

    println!("For more commands:");
    println!("  chatlog --help");
}
