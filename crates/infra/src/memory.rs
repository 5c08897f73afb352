//! Thread-safe in-memory stores.
//!
//! Each store is a `Mutex` over a map; the product store's conditional
//! decrement holds that lock across check and write, which is what makes
//! concurrent orders against one product race-free.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use shopcore_auth::User;
use shopcore_catalog::{Product, ProductPatch};
use shopcore_core::{OrderId, Page, Pagination, ProductId};
use shopcore_orders::Order;

use crate::store::{OrderStore, ProductStore, StoreError, UpdateError, UserStore};

/// Users keyed by lowercase email (the unique key).
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: Mutex<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.inner.lock().unwrap();
        if users.contains_key(&user.email) {
            return Err(StoreError::Conflict("email already in use".to_string()));
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.lock().unwrap().get(email).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: Mutex<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn insert(&self, product: Product) -> Result<(), StoreError> {
        self.inner.lock().unwrap().insert(product.id, product);
        Ok(())
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.inner.lock().unwrap().get(&id).cloned())
    }

    fn list(&self, page: Pagination) -> Result<Page<Product>, StoreError> {
        let products = self.inner.lock().unwrap();
        let total = products.len() as u64;

        let mut items: Vec<Product> = products.values().cloned().collect();
        // Newest first; ids are time-ordered (UUIDv7) and break created_at ties.
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });

        let items = items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page { items, total })
    }

    fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> Result<Product, UpdateError> {
        let mut products = self.inner.lock().unwrap();
        let product = products.get_mut(&id).ok_or(StoreError::NotFound)?;
        product.apply_patch(patch, now)?;
        Ok(product.clone())
    }

    fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        match self.inner.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn decrement_stock(
        &self,
        id: ProductId,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        let mut products = self.inner.lock().unwrap();
        let product = products.get_mut(&id).ok_or(StoreError::NotFound)?;

        if product.stock < quantity {
            return Err(StoreError::InsufficientStock {
                available: product.stock,
                requested: quantity,
            });
        }
        product.stock -= quantity;
        product.updated_at = now;
        Ok(product.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: Mutex<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&self, order: Order) -> Result<(), StoreError> {
        self.inner.lock().unwrap().insert(order.id, order);
        Ok(())
    }

    fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.inner.lock().unwrap().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcore_auth::Role;
    use shopcore_catalog::NewProduct;
    use shopcore_core::UserId;

    fn product(name: &str, price: i64, stock: i64) -> Product {
        Product::create(
            ProductId::new(),
            NewProduct {
                name: name.to_string(),
                description: "A useful widget".to_string(),
                price,
                stock,
            },
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let store = InMemoryUserStore::new();
        let now = Utc::now();
        store
            .insert(User::new(UserId::new(), "A", "a@x.com", "h1", Role::User, now))
            .unwrap();

        let err = store
            .insert(User::new(UserId::new(), "B", "a@x.com", "h2", Role::User, now))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn decrement_succeeds_when_stock_suffices() {
        let store = InMemoryProductStore::new();
        let p = product("Widget", 10, 5);
        let id = p.id;
        store.insert(p).unwrap();

        let updated = store.decrement_stock(id, 2, Utc::now()).unwrap();
        assert_eq!(updated.stock, 3);
    }

    #[test]
    fn decrement_beyond_stock_changes_nothing() {
        let store = InMemoryProductStore::new();
        let p = product("Widget", 10, 3);
        let id = p.id;
        store.insert(p).unwrap();

        let err = store.decrement_stock(id, 10, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientStock {
                available: 3,
                requested: 10
            }
        );
        assert_eq!(store.get(id).unwrap().unwrap().stock, 3);
    }

    #[test]
    fn decrement_of_missing_product_is_not_found() {
        let store = InMemoryProductStore::new();
        let err = store
            .decrement_stock(ProductId::new(), 1, Utc::now())
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn concurrent_decrements_never_oversell() {
        let store = InMemoryProductStore::new();
        let p = product("Widget", 10, 5);
        let id = p.id;
        store.insert(p).unwrap();

        // Two orders of 3 against stock 5: exactly one may win.
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..2)
                .map(|_| s.spawn(|| store.decrement_stock(id, 3, Utc::now())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert_eq!(store.get(id).unwrap().unwrap().stock, 2);
    }

    #[test]
    fn update_merges_patch_or_reports_not_found() {
        let store = InMemoryProductStore::new();
        let p = product("Widget", 10, 5);
        let id = p.id;
        store.insert(p).unwrap();

        let updated = store
            .update(
                id,
                ProductPatch {
                    price: Some(15),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();
        assert_eq!(updated.price, 15);
        assert_eq!(updated.stock, 5);

        let err = store
            .update(ProductId::new(), ProductPatch::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, UpdateError::Store(StoreError::NotFound)));
    }

    #[test]
    fn placed_order_is_persisted_with_its_price_snapshot() {
        let store = InMemoryOrderStore::new();
        let p = product("Widget", 10, 5);
        let order = Order::place(OrderId::new(), UserId::new(), &p, 3, Utc::now()).unwrap();
        let id = order.id;
        store.insert(order).unwrap();

        let stored = store.get(id).unwrap().unwrap();
        assert_eq!(stored.total_price, 30);
        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.product_id, p.id);

        assert_eq!(store.get(OrderId::new()).unwrap(), None);
    }

    #[test]
    fn list_is_newest_first_and_paginated() {
        let store = InMemoryProductStore::new();
        let mut ids = Vec::new();
        for (i, name) in ["First", "Second", "Third"].iter().enumerate() {
            let mut p = product(name, 10, 1);
            p.created_at = Utc::now() + chrono::Duration::seconds(i as i64);
            ids.push(p.id);
            store.insert(p).unwrap();
        }

        let page = store.list(Pagination::new(1, 2)).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name, "Third");

        let page = store.list(Pagination::new(2, 2)).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "First");
    }
}
