use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    AcceptedQuotation, NewOrder, NewProduct, NewQuoteRequest, NewUser, Order, Product,
    ProductFilter, QuoteLine, QuoteRequest, Role, User,
};
use crate::database::store::{OrderStore, ProductStore, QuotationStore, Store, UserStore};

const USER_COLUMNS: &str = "id, name, email, password, role, created_at, updated_at";
const PRODUCT_COLUMNS: &str =
    "id, name, price, inventory, minimum_stock_level, supplier, created_at, updated_at";
const ORDER_COLUMNS: &str = "id, product, quantity, supplier, ordered_by, status, created_at";
const QUOTE_COLUMNS: &str = "id, supplier_id, products, date, status, created_at";

/// Postgres-backed store using runtime-checked queries
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        role: role
            .parse::<Role>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn quote_request_from_row(row: &PgRow) -> Result<QuoteRequest, sqlx::Error> {
    let Json(products): Json<Vec<QuoteLine>> = row.try_get("products")?;
    Ok(QuoteRequest {
        id: row.try_get("id")?,
        supplier_id: row.try_get("supplier_id")?,
        products,
        date: row.try_get("date")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

fn accepted_from_row(row: &PgRow) -> Result<AcceptedQuotation, sqlx::Error> {
    let Json(products): Json<Vec<QuoteLine>> = row.try_get("products")?;
    Ok(AcceptedQuotation {
        id: row.try_get("id")?,
        supplier_id: row.try_get("supplier_id")?,
        products,
        date: row.try_get("date")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(user_from_row).collect::<Result<_, _>>()?)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let user = new_user.into_user();
        sqlx::query(
            "INSERT INTO users (id, name, email, password, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(user)
    }

    async fn save_user(&self, user: &User) -> Result<User, DatabaseError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET name = $2, email = $3, role = $4, updated_at = $5
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user_from_row(&row)?)
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query(&format!("DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, DatabaseError> {
        let products = match filter.supplier {
            Some(supplier) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE supplier = $1 ORDER BY created_at"
                ))
                .bind(supplier)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(products)
    }

    async fn create_product(&self, new_product: NewProduct) -> Result<Product, DatabaseError> {
        let product = new_product.into_product();
        sqlx::query(
            "INSERT INTO products
             (id, name, price, inventory, minimum_stock_level, supplier, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.inventory)
        .bind(product.minimum_stock_level)
        .bind(product.supplier)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(product)
    }

    async fn save_product(&self, product: &Product) -> Result<Product, DatabaseError> {
        let saved = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products
             SET name = $2, price = $3, inventory = $4, minimum_stock_level = $5, updated_at = $6
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.inventory)
        .bind(product.minimum_stock_level)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_products(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn create_order(&self, new_order: NewOrder) -> Result<Order, DatabaseError> {
        let order = new_order.into_order();
        sqlx::query(
            "INSERT INTO orders (id, product, quantity, supplier, ordered_by, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(order.id)
        .bind(order.product)
        .bind(order.quantity)
        .bind(order.supplier)
        .bind(order.ordered_by)
        .bind(&order.status)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;
        Ok(order)
    }

    async fn list_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, DatabaseError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE ordered_by = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }
}

#[async_trait]
impl QuotationStore for PgStore {
    async fn create_quote_request(
        &self,
        new_request: NewQuoteRequest,
    ) -> Result<QuoteRequest, DatabaseError> {
        let request = new_request.into_quote_request();
        sqlx::query(
            "INSERT INTO quote_requests (id, supplier_id, products, date, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(request.id)
        .bind(request.supplier_id)
        .bind(Json(&request.products))
        .bind(request.date)
        .bind(&request.status)
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;
        Ok(request)
    }

    async fn find_quote_request(&self, id: Uuid) -> Result<Option<QuoteRequest>, DatabaseError> {
        let row = sqlx::query(&format!("SELECT {QUOTE_COLUMNS} FROM quote_requests WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(quote_request_from_row).transpose()?)
    }

    async fn list_quote_requests(
        &self,
        supplier_id: Option<Uuid>,
    ) -> Result<Vec<QuoteRequest>, DatabaseError> {
        let rows = sqlx::query(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quote_requests
             WHERE ($1::uuid IS NULL OR supplier_id = $1) ORDER BY created_at"
        ))
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(quote_request_from_row).collect::<Result<_, _>>()?)
    }

    async fn update_quote_request_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<QuoteRequest, DatabaseError> {
        let row = sqlx::query(&format!(
            "UPDATE quote_requests SET status = $2 WHERE id = $1 RETURNING {QUOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(quote_request_from_row(&row)?)
    }

    async fn move_to_accepted(&self, id: Uuid) -> Result<AcceptedQuotation, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "DELETE FROM quote_requests WHERE id = $1 RETURNING {QUOTE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("quotation {}", id)))?;
        let request = quote_request_from_row(&row)?;

        let accepted = AcceptedQuotation::from_request(&request);
        sqlx::query(
            "INSERT INTO accepted_quotations (id, supplier_id, products, date, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(accepted.id)
        .bind(accepted.supplier_id)
        .bind(Json(&accepted.products))
        .bind(accepted.date)
        .bind(&accepted.status)
        .bind(accepted.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(accepted)
    }

    async fn list_accepted_quotations(
        &self,
        supplier_id: Option<Uuid>,
    ) -> Result<Vec<AcceptedQuotation>, DatabaseError> {
        let rows = sqlx::query(&format!(
            "SELECT {QUOTE_COLUMNS} FROM accepted_quotations
             WHERE ($1::uuid IS NULL OR supplier_id = $1) ORDER BY created_at"
        ))
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(accepted_from_row).collect::<Result<_, _>>()?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
