use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopcore_core::{ProductId, UserId, ValidationErrors};

/// Upper bound on a unit price, in smallest currency units.
///
/// Together with the per-order quantity cap this keeps any order total
/// within `u64` without runtime overflow handling.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// A sellable catalog entry.
///
/// `price` is in the smallest currency unit (e.g. cents). `stock` is the
/// count of sellable units; it never goes negative because every decrement
/// is a conditional update at the store layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw creation input (as deserialized from a request, before checks).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i64,
}

/// Partial update: any subset of the mutable fields.
///
/// Absent fields are left untouched by [`Product::apply_patch`].
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
}

impl Product {
    /// Validate creation input and build the record.
    pub fn create(
        id: ProductId,
        input: NewProduct,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, &input.name);
        check_description(&mut errors, &input.description);
        check_price(&mut errors, input.price);
        check_stock(&mut errors, input.stock);
        errors.into_result()?;

        Ok(Self {
            id,
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            price: input.price as u64,
            stock: input.stock as u32,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate and merge a partial update onto this record.
    ///
    /// On any failed check nothing is changed, including `updated_at`.
    pub fn apply_patch(
        &mut self,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &patch.name {
            check_name(&mut errors, name);
        }
        if let Some(description) = &patch.description {
            check_description(&mut errors, description);
        }
        if let Some(price) = patch.price {
            check_price(&mut errors, price);
        }
        if let Some(stock) = patch.stock {
            check_stock(&mut errors, stock);
        }
        errors.into_result()?;

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(price) = patch.price {
            self.price = price as u64;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock as u32;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    let len = name.trim().chars().count();
    if !(2..=100).contains(&len) {
        errors.push("name", "must be between 2 and 100 characters");
    }
}

fn check_description(errors: &mut ValidationErrors, description: &str) {
    let len = description.trim().chars().count();
    if !(5..=1000).contains(&len) {
        errors.push("description", "must be between 5 and 1000 characters");
    }
}

fn check_price(errors: &mut ValidationErrors, price: i64) {
    if price <= 0 {
        errors.push("price", "must be greater than zero");
    } else if price > MAX_PRICE {
        errors.push("price", "is out of range");
    }
}

fn check_stock(errors: &mut ValidationErrors, stock: i64) {
    if stock < 0 {
        errors.push("stock", "must not be negative");
    } else if stock > i64::from(u32::MAX) {
        errors.push("stock", "is out of range");
    }
}
