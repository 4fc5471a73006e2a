use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const QUOTATION_STATUS_ACCEPTED: &str = "Accepted";

/// One requested product inside a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub product_id: Uuid,
    #[serde(default)]
    pub quantity: i64,
}

/// A pending quotation. `status` is free text owned by the addressed supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub products: Vec<QuoteLine>,
    pub date: DateTime<Utc>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuoteRequest {
    pub supplier_id: Uuid,
    pub products: Vec<QuoteLine>,
    pub date: DateTime<Utc>,
}

impl NewQuoteRequest {
    pub fn into_quote_request(self) -> QuoteRequest {
        QuoteRequest {
            id: Uuid::new_v4(),
            supplier_id: self.supplier_id,
            products: self.products,
            date: self.date,
            status: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedQuotation {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub products: Vec<QuoteLine>,
    pub date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl AcceptedQuotation {
    /// Copy of the pending request under a fresh id, status forced to "Accepted".
    pub fn from_request(request: &QuoteRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            supplier_id: request.supplier_id,
            products: request.products.clone(),
            date: request.date,
            status: QUOTATION_STATUS_ACCEPTED.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Fields shared by both quotation collections, used when building
/// enriched responses.
pub trait QuotationRecord {
    fn id(&self) -> Uuid;
    fn supplier_id(&self) -> Uuid;
    fn lines(&self) -> &[QuoteLine];
    fn date(&self) -> DateTime<Utc>;
    fn status(&self) -> Option<&str>;
}

impl QuotationRecord for QuoteRequest {
    fn id(&self) -> Uuid {
        self.id
    }
    fn supplier_id(&self) -> Uuid {
        self.supplier_id
    }
    fn lines(&self) -> &[QuoteLine] {
        &self.products
    }
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl QuotationRecord for AcceptedQuotation {
    fn id(&self) -> Uuid {
        self.id
    }
    fn supplier_id(&self) -> Uuid {
        self.supplier_id
    }
    fn lines(&self) -> &[QuoteLine] {
        &self.products
    }
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_line_quantity_defaults_to_zero() {
        let id = Uuid::new_v4();
        let line: QuoteLine = serde_json::from_value(json!({ "productId": id })).unwrap();
        assert_eq!(line.product_id, id);
        assert_eq!(line.quantity, 0);
    }

    #[test]
    fn accepted_copy_keeps_payload_and_forces_status() {
        let mut request = NewQuoteRequest {
            supplier_id: Uuid::new_v4(),
            products: vec![QuoteLine { product_id: Uuid::new_v4(), quantity: 3 }],
            date: Utc::now(),
        }
        .into_quote_request();
        request.status = Some("Rejected".to_string());

        let accepted = AcceptedQuotation::from_request(&request);
        assert_ne!(accepted.id, request.id);
        assert_eq!(accepted.supplier_id, request.supplier_id);
        assert_eq!(accepted.products, request.products);
        assert_eq!(accepted.date, request.date);
        assert_eq!(accepted.status, QUOTATION_STATUS_ACCEPTED);
    }
}
