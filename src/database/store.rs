//! Store seams. Each collection gets its own trait so handlers only name
//! what they touch; `Store` bundles them for `AppState`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    AcceptedQuotation, NewOrder, NewProduct, NewQuoteRequest, NewUser, Order, Product,
    ProductFilter, QuoteRequest, User,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError>;
    /// Persists name, email and role of an existing user.
    async fn save_user(&self, user: &User) -> Result<User, DatabaseError>;
    /// Returns the removed record, or `None` when nothing matched.
    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError>;
    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, DatabaseError>;
    async fn create_product(&self, new_product: NewProduct) -> Result<Product, DatabaseError>;
    /// Persists the mutable fields. `supplier` is never written.
    async fn save_product(&self, product: &Product) -> Result<Product, DatabaseError>;
    async fn delete_product(&self, id: Uuid) -> Result<bool, DatabaseError>;
    async fn count_products(&self) -> Result<i64, DatabaseError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, new_order: NewOrder) -> Result<Order, DatabaseError>;
    async fn list_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, DatabaseError>;
}

#[async_trait]
pub trait QuotationStore: Send + Sync {
    async fn create_quote_request(
        &self,
        new_request: NewQuoteRequest,
    ) -> Result<QuoteRequest, DatabaseError>;
    async fn find_quote_request(&self, id: Uuid) -> Result<Option<QuoteRequest>, DatabaseError>;
    async fn list_quote_requests(
        &self,
        supplier_id: Option<Uuid>,
    ) -> Result<Vec<QuoteRequest>, DatabaseError>;
    async fn update_quote_request_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<QuoteRequest, DatabaseError>;
    /// Creates the accepted copy and removes the pending record as one unit.
    /// `NotFound` if the pending record vanished in the meantime.
    async fn move_to_accepted(&self, id: Uuid) -> Result<AcceptedQuotation, DatabaseError>;
    async fn list_accepted_quotations(
        &self,
        supplier_id: Option<Uuid>,
    ) -> Result<Vec<AcceptedQuotation>, DatabaseError>;
}

#[async_trait]
pub trait Store: UserStore + ProductStore + OrderStore + QuotationStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
