use clap::Subcommand;
use uuid::Uuid;

use crate::cli::config::client;
use crate::cli::utils::{output_item, output_list, output_success};
use crate::cli::OutputFormat;
use crate::client::UserUpdate;
use crate::database::models::{Role, User};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List users")]
    List {
        #[arg(long, help = "Use the admin listing endpoint")]
        admin: bool,
    },

    #[command(about = "Update a user (admin)")]
    Update {
        #[arg(help = "User id")]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },

    #[command(about = "Delete a user (admin)")]
    Delete {
        #[arg(help = "User id")]
        id: Uuid,
    },
}

fn user_line(user: &User) -> String {
    format!("{}  {:<9} {} <{}>", user.id, user.role, user.name, user.email)
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = client()?;

    match cmd {
        UserCommands::List { admin } => {
            let users = if admin {
                client.fetch_users().await?
            } else {
                client.list_users().await?
            };
            output_list(&output_format, &users, "No users found", user_line)
        }
        UserCommands::Update { id, name, email, role } => {
            let user = client.update_user(id, &UserUpdate { name, email, role }).await?;
            output_item(&output_format, &user, &format!("✓ Updated {}", user_line(&user)))
        }
        UserCommands::Delete { id } => {
            let body = client.delete_user(id).await?;
            output_success(&output_format, &body.message, None)
        }
    }
}
