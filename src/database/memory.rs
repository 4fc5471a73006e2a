use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    AcceptedQuotation, NewOrder, NewProduct, NewQuoteRequest, NewUser, Order, Product,
    ProductFilter, QuoteRequest, User,
};
use crate::database::store::{OrderStore, ProductStore, QuotationStore, Store, UserStore};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    products: Vec<Product>,
    orders: Vec<Order>,
    quote_requests: Vec<QuoteRequest>,
    accepted_quotations: Vec<AcceptedQuotation>,
}

/// Process-local store. All collections sit behind one lock, so every
/// operation (including the accepted-quotation move) is atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &[User], email: &str, except: Option<Uuid>) -> bool {
    users
        .iter()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let mut inner = self.inner.write().await;
        if email_taken(&inner.users, &new_user.email, None) {
            return Err(DatabaseError::Conflict(format!("email '{}' already exists", new_user.email)));
        }
        let user = new_user.into_user();
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn save_user(&self, user: &User) -> Result<User, DatabaseError> {
        let mut inner = self.inner.write().await;
        if email_taken(&inner.users, &user.email, Some(user.id)) {
            return Err(DatabaseError::Conflict(format!("email '{}' already exists", user.email)));
        }
        let stored = inner
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user.id)))?;
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.role = user.role;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let mut inner = self.inner.write().await;
        let position = inner.users.iter().position(|u| u.id == id);
        Ok(position.map(|i| inner.users.remove(i)))
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn create_product(&self, new_product: NewProduct) -> Result<Product, DatabaseError> {
        let product = new_product.into_product();
        self.inner.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn save_product(&self, product: &Product) -> Result<Product, DatabaseError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("product {}", product.id)))?;
        stored.name = product.name.clone();
        stored.price = product.price;
        stored.inventory = product.inventory;
        stored.minimum_stock_level = product.minimum_stock_level;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut inner = self.inner.write().await;
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        Ok(inner.products.len() != before)
    }

    async fn count_products(&self) -> Result<i64, DatabaseError> {
        Ok(self.inner.read().await.products.len() as i64)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, new_order: NewOrder) -> Result<Order, DatabaseError> {
        let order = new_order.into_order();
        self.inner.write().await.orders.push(order.clone());
        Ok(order)
    }

    async fn list_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner
            .orders
            .iter()
            .filter(|o| o.ordered_by == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuotationStore for MemoryStore {
    async fn create_quote_request(
        &self,
        new_request: NewQuoteRequest,
    ) -> Result<QuoteRequest, DatabaseError> {
        let request = new_request.into_quote_request();
        self.inner.write().await.quote_requests.push(request.clone());
        Ok(request)
    }

    async fn find_quote_request(&self, id: Uuid) -> Result<Option<QuoteRequest>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.quote_requests.iter().find(|q| q.id == id).cloned())
    }

    async fn list_quote_requests(
        &self,
        supplier_id: Option<Uuid>,
    ) -> Result<Vec<QuoteRequest>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner
            .quote_requests
            .iter()
            .filter(|q| supplier_id.map_or(true, |s| q.supplier_id == s))
            .cloned()
            .collect())
    }

    async fn update_quote_request_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<QuoteRequest, DatabaseError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .quote_requests
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("quotation {}", id)))?;
        stored.status = Some(status.to_string());
        Ok(stored.clone())
    }

    async fn move_to_accepted(&self, id: Uuid) -> Result<AcceptedQuotation, DatabaseError> {
        let mut inner = self.inner.write().await;
        let position = inner
            .quote_requests
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("quotation {}", id)))?;
        let request = inner.quote_requests.remove(position);
        let accepted = AcceptedQuotation::from_request(&request);
        inner.accepted_quotations.push(accepted.clone());
        Ok(accepted)
    }

    async fn list_accepted_quotations(
        &self,
        supplier_id: Option<Uuid>,
    ) -> Result<Vec<AcceptedQuotation>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner
            .accepted_quotations
            .iter()
            .filter(|q| supplier_id.map_or(true, |s| q.supplier_id == s))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
