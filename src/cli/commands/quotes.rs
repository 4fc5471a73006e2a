use chrono::{DateTime, Utc};
use clap::Subcommand;
use uuid::Uuid;

use crate::cli::config::client;
use crate::cli::utils::{output_item, output_list, output_success};
use crate::cli::OutputFormat;
use crate::database::models::QuoteLine;
use crate::services::enrichment::EnrichedQuotation;

#[derive(Subcommand)]
pub enum QuoteCommands {
    #[command(about = "Send a quotation request to a supplier")]
    Request {
        #[arg(help = "Supplier user id")]
        supplier_id: Uuid,
        #[arg(long = "item", value_parser = parse_quote_line, help = "PRODUCT_ID:QUANTITY, repeatable")]
        items: Vec<QuoteLine>,
        #[arg(long, help = "RFC 3339 date (default now)")]
        date: Option<DateTime<Utc>>,
    },

    #[command(about = "All pending quotations")]
    History,

    #[command(about = "Pending quotations addressed to you")]
    Pending,

    #[command(about = "Set the status of a quotation addressed to you")]
    Status {
        #[arg(help = "Quotation id")]
        id: Uuid,
        status: String,
    },

    #[command(about = "Move a pending quotation to the accepted list")]
    Accept {
        #[arg(help = "Quotation id")]
        id: Uuid,
    },

    #[command(about = "Accepted quotations addressed to you")]
    Accepted {
        #[arg(long, help = "Every supplier's accepted quotations (admin)")]
        all: bool,
    },
}

fn parse_quote_line(raw: &str) -> Result<QuoteLine, String> {
    let (product, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:QUANTITY, got '{}'", raw))?;
    let product_id = Uuid::parse_str(product.trim()).map_err(|e| format!("bad product id: {}", e))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad quantity: {}", e))?;
    Ok(QuoteLine { product_id, quantity })
}

fn quotation_line(quote: &EnrichedQuotation) -> String {
    let lines: Vec<String> = quote
        .products
        .iter()
        .map(|line| format!("{} x{}", line.product_name, line.quantity))
        .collect();
    format!(
        "{}  {:<20} {:<10} {}  [{}]",
        quote.id,
        quote.supplier_name,
        quote.status.as_deref().unwrap_or("-"),
        quote.date.format("%Y-%m-%d"),
        lines.join(", ")
    )
}

pub async fn handle(cmd: QuoteCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = client()?;

    match cmd {
        QuoteCommands::Request { supplier_id, items, date } => {
            let saved = client.save_quote_request(supplier_id, &items, date).await?;
            output_item(
                &output_format,
                &saved,
                &format!("✓ {} ({})", saved.message, saved.data.id),
            )
        }
        QuoteCommands::History => {
            let quotes = client.fetch_quotation_history().await?;
            output_list(&output_format, &quotes, "No pending quotations", quotation_line)
        }
        QuoteCommands::Pending => {
            let quotes = client.fetch_supplier_quotations().await?;
            output_list(&output_format, &quotes, "No quotations addressed to you", quotation_line)
        }
        QuoteCommands::Status { id, status } => {
            let updated = client.update_quotation_status(id, &status).await?;
            output_item(&output_format, &updated, &format!("✓ {}", updated.message))
        }
        QuoteCommands::Accept { id } => {
            let body = client.move_to_accepted(id).await?;
            output_success(&output_format, &body.message, None)
        }
        QuoteCommands::Accepted { all } => {
            let quotes = if all {
                client.fetch_all_accepted_quotations().await?
            } else {
                client.fetch_accepted_quotations_for_supplier().await?
            };
            output_list(&output_format, &quotes, "No accepted quotations", quotation_line)
        }
    }
}
