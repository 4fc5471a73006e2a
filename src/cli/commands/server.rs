use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{client, load_cli_config, save_cli_config};
use crate::cli::utils::{output_item, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Point the CLI at a server")]
    Use {
        #[arg(help = "Server root URL, e.g. http://localhost:5000")]
        url: String,
    },

    #[command(about = "Show the selected server")]
    Current,

    #[command(about = "Check server health from the /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Use { url } => {
            url::Url::parse(&url).map_err(|e| anyhow::anyhow!("invalid server URL '{}': {}", url, e))?;

            let mut config = load_cli_config()?;
            config.server_url = url.clone();
            config.updated_at = Some(Utc::now());
            save_cli_config(&config)?;

            output_success(
                &output_format,
                &format!("Using server {}", url),
                Some(json!({ "server_url": url })),
            )
        }
        ServerCommands::Current => {
            let config = load_cli_config()?;
            output_item(&output_format, &config, &format!("Current server: {}", config.server_url))
        }
        ServerCommands::Health => {
            let client = client()?;
            let health = client.health().await?;
            let status = health.get("status").and_then(|s| s.as_str()).unwrap_or("unknown");
            output_item(
                &output_format,
                &health,
                &format!("{} is {}", client.base_url(), status),
            )
        }
    }
}
