use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub inventory: i64,
    pub minimum_stock_level: i64,
    /// Owning supplier. Set at creation, never rewritten.
    pub supplier: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.inventory < self.minimum_stock_level
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub inventory: i64,
    pub minimum_stock_level: i64,
    pub supplier: Uuid,
}

impl NewProduct {
    pub fn into_product(self) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: self.name,
            price: self.price,
            inventory: self.inventory,
            minimum_stock_level: self.minimum_stock_level,
            supplier: self.supplier,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing filter; `supplier: None` means every product.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub supplier: Option<Uuid>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn owned_by(supplier: Uuid) -> Self {
        Self { supplier: Some(supplier) }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.supplier.map_or(true, |s| product.supplier == s)
    }
}
