use clap::Subcommand;
use uuid::Uuid;

use crate::cli::config::client;
use crate::cli::utils::{output_item, output_list};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum OrderCommands {
    #[command(about = "Order a product")]
    Place {
        #[arg(help = "Product id")]
        product_id: Uuid,
        quantity: i64,
    },

    #[command(about = "Orders you have placed")]
    List,
}

pub async fn handle(cmd: OrderCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = client()?;

    match cmd {
        OrderCommands::Place { product_id, quantity } => {
            let order = client.place_order(product_id, quantity).await?;
            output_item(
                &output_format,
                &order,
                &format!("✓ Order {} placed ({} x {}, {})", order.id, order.quantity, order.product, order.status),
            )
        }
        OrderCommands::List => {
            let orders = client.fetch_orders().await?;
            output_list(&output_format, &orders, "No orders found", |view| {
                format!(
                    "{}  {:<24} x{:<5} {}  {}",
                    view.order.id,
                    view.product_name,
                    view.order.quantity,
                    view.order.status,
                    view.order.created_at.format("%Y-%m-%d %H:%M")
                )
            })
        }
    }
}
