use clap::Subcommand;
use serde_json::json;

use crate::cli::config::client;
use crate::cli::utils::{output_item, output_success};
use crate::cli::OutputFormat;
use crate::client::{RegisterInput, SessionStore, TOKEN_KEY};
use crate::database::models::Role;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create an account")]
    Register {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "SUPPLIER_PASSWORD", help = "Password")]
        password: String,
        #[arg(long, help = "admin, supplier or customer (default customer)")]
        role: Option<Role>,
    },

    #[command(about = "Login and keep the session token")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "SUPPLIER_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Forget the session token")]
    Logout,

    #[command(about = "Show whether a session token is stored")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = client()?;

    match cmd {
        AuthCommands::Register { name, email, password, role } => {
            let registered = client
                .register(&RegisterInput { name, email, password, role })
                .await?;
            output_item(
                &output_format,
                &registered,
                &format!("✓ Registered {} ({}) as {}", registered.name, registered.id, registered.role),
            )
        }
        AuthCommands::Login { email, password } => {
            let login = client.login(&email, &password).await?;
            output_success(
                &output_format,
                &format!("{} as {}", login.message, login.role),
                Some(json!({ "role": login.role })),
            )
        }
        AuthCommands::Logout => {
            client.logout()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let logged_in = client.session().get(TOKEN_KEY).is_some();
            let text = if logged_in {
                format!("Session token stored for {}", client.base_url())
            } else {
                "Not logged in".to_string()
            };
            output_item(&output_format, &json!({ "logged_in": logged_in }), &text)
        }
    }
}
