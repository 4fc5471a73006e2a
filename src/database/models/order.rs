use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ORDER_STATUS_PENDING: &str = "Pending";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub product: Uuid,
    pub quantity: i64,
    /// Copied from the product when the order was placed.
    pub supplier: Uuid,
    pub ordered_by: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub product: Uuid,
    pub quantity: i64,
    pub supplier: Uuid,
    pub ordered_by: Uuid,
}

impl NewOrder {
    pub fn into_order(self) -> Order {
        Order {
            id: Uuid::new_v4(),
            product: self.product,
            quantity: self.quantity,
            supplier: self.supplier,
            ordered_by: self.ordered_by,
            status: ORDER_STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        }
    }
}
