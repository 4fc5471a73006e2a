use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::config::client;
use crate::cli::utils::{output_item, output_list, output_success};
use crate::cli::OutputFormat;
use crate::client::ProductInput;
use crate::database::models::Product;

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List your products (admins see all)")]
    List,

    #[command(about = "Add a product (suppliers only)")]
    Add {
        name: String,
        price: f64,
        inventory: i64,
        #[arg(help = "Minimum stock level")]
        minimum_stock_level: i64,
    },

    #[command(about = "Update one of your products")]
    Update {
        #[arg(help = "Product id")]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        inventory: Option<i64>,
        #[arg(long)]
        minimum_stock_level: Option<i64>,
    },

    #[command(about = "Delete one of your products")]
    Delete {
        #[arg(help = "Product id")]
        id: Uuid,
    },

    #[command(about = "Products below their minimum stock level")]
    Suggest,

    #[command(about = "Total number of products")]
    Count,
}

fn product_line(product: &Product) -> String {
    let flag = if product.is_low_stock() { " LOW" } else { "" };
    format!(
        "{}  {:<24} {:>10.2}  stock {}/{}{}",
        product.id, product.name, product.price, product.inventory, product.minimum_stock_level, flag
    )
}

pub async fn handle(cmd: ProductCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = client()?;

    match cmd {
        ProductCommands::List => {
            let products = client.fetch_products().await?;
            output_list(&output_format, &products, "No products found", product_line)
        }
        ProductCommands::Add {
            name,
            price,
            inventory,
            minimum_stock_level,
        } => {
            let input = ProductInput {
                name: Some(name),
                price: Some(price),
                inventory: Some(inventory),
                minimum_stock_level: Some(minimum_stock_level),
            };
            let product = client.add_product(&input).await?;
            output_item(&output_format, &product, &format!("✓ Added {}", product_line(&product)))
        }
        ProductCommands::Update {
            id,
            name,
            price,
            inventory,
            minimum_stock_level,
        } => {
            let input = ProductInput {
                name,
                price,
                inventory,
                minimum_stock_level,
            };
            let product = client.update_product(id, &input).await?;
            output_item(&output_format, &product, &format!("✓ Updated {}", product_line(&product)))
        }
        ProductCommands::Delete { id } => {
            let body = client.delete_product(id).await?;
            output_success(&output_format, &body.message, None)
        }
        ProductCommands::Suggest => {
            let products = client.suggest_products().await?;
            output_list(&output_format, &products, "No products below minimum stock", product_line)
        }
        ProductCommands::Count => {
            let count = client.product_count().await?;
            output_item(&output_format, &json!({ "count": count }), &format!("{} products", count))
        }
    }
}
