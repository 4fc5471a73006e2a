//! Resolves supplier and product names for quotation and order listings.
//!
//! Every reference gets its own lookup; lookups for one listing run
//! concurrently but are neither batched nor deduplicated. A reference that
//! no longer resolves becomes a placeholder name rather than an error.

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{Order, QuotationRecord, QuoteLine};
use crate::database::{DatabaseError, Store};

pub const UNKNOWN_SUPPLIER: &str = "Unknown Supplier";
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLine {
    pub product_id: Uuid,
    pub quantity: i64,
    pub product_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedQuotation {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub products: Vec<EnrichedLine>,
    pub date: DateTime<Utc>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub product_name: String,
}

pub async fn supplier_name(store: &dyn Store, id: Uuid) -> Result<String, DatabaseError> {
    Ok(store
        .find_user_by_id(id)
        .await?
        .map(|user| user.name)
        .unwrap_or_else(|| UNKNOWN_SUPPLIER.to_string()))
}

pub async fn product_name(store: &dyn Store, id: Uuid) -> Result<String, DatabaseError> {
    Ok(store
        .find_product_by_id(id)
        .await?
        .map(|product| product.name)
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()))
}

async fn enrich_line(store: &dyn Store, line: &QuoteLine) -> Result<EnrichedLine, DatabaseError> {
    Ok(EnrichedLine {
        product_id: line.product_id,
        quantity: line.quantity,
        product_name: product_name(store, line.product_id).await?,
    })
}

pub async fn enrich_quotation<Q>(store: &dyn Store, quote: &Q) -> Result<EnrichedQuotation, DatabaseError>
where
    Q: QuotationRecord + Sync,
{
    let (supplier_name, products) = futures::try_join!(
        supplier_name(store, quote.supplier_id()),
        try_join_all(quote.lines().iter().map(|line| enrich_line(store, line))),
    )?;

    Ok(EnrichedQuotation {
        id: quote.id(),
        supplier_id: quote.supplier_id(),
        supplier_name,
        products,
        date: quote.date(),
        status: quote.status().map(str::to_string),
    })
}

pub async fn enrich_quotations<Q>(store: &dyn Store, quotes: &[Q]) -> Result<Vec<EnrichedQuotation>, DatabaseError>
where
    Q: QuotationRecord + Sync,
{
    try_join_all(quotes.iter().map(|quote| enrich_quotation(store, quote))).await
}

pub async fn enrich_orders(store: &dyn Store, orders: Vec<Order>) -> Result<Vec<OrderView>, DatabaseError> {
    try_join_all(orders.into_iter().map(|order| async move {
        let product_name = product_name(store, order.product).await?;
        Ok::<_, DatabaseError>(OrderView { order, product_name })
    }))
    .await
}
