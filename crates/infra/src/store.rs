//! Persistence seams for users, products, and orders.

use chrono::{DateTime, Utc};
use thiserror::Error;

use shopcore_auth::User;
use shopcore_catalog::{Product, ProductPatch};
use shopcore_core::{OrderId, Page, Pagination, ProductId, ValidationErrors};
use shopcore_orders::Order;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// Unique-key violation (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u32 },

    /// Backend failure a caller cannot act on (maps to 500 at the boundary).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failure of a patch-style update: either the record is missing or the
/// supplied fields failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::Conflict`] when the email
    /// is already registered (emails are stored lowercased).
    fn insert(&self, user: User) -> Result<(), StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

pub trait ProductStore: Send + Sync {
    fn insert(&self, product: Product) -> Result<(), StoreError>;

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// One page of products, newest first.
    fn list(&self, page: Pagination) -> Result<Page<Product>, StoreError>;

    /// Validate and merge a partial update onto the stored record, holding
    /// the record exclusively across read-merge-write.
    fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> Result<Product, UpdateError>;

    fn delete(&self, id: ProductId) -> Result<(), StoreError>;

    /// Atomically decrement stock by `quantity` iff `stock >= quantity`,
    /// returning the updated record (the order flow snapshots its price).
    ///
    /// Contract: for any set of concurrent calls against one product, the
    /// sum of accepted decrements never exceeds the starting stock, and each
    /// accepted decrement is visible before the next call is evaluated.
    /// Durable implementations must pair this with the subsequent order
    /// insert in a single transaction so a crash cannot strand decremented
    /// stock without an order.
    fn decrement_stock(
        &self,
        id: ProductId,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<Product, StoreError>;
}

pub trait OrderStore: Send + Sync {
    fn insert(&self, order: Order) -> Result<(), StoreError>;

    fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
}
