//! Request/response DTOs and JSON mapping helpers.
//!
//! Request fields are defaulted/optional so that missing fields surface as
//! field-level 400s from our own validators instead of deserializer
//! rejections; presence checks happen in the `into_*` conversions here and
//! range checks in the domain constructors.

use serde::Deserialize;
use serde_json::json;

use shopcore_catalog::{NewProduct, Product, ProductPatch};
use shopcore_core::{Pagination, ValidationErrors, pagination::DEFAULT_PAGE_LIMIT};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.email.trim().is_empty() || !self.email.contains('@') {
            errors.push("email", "must be a valid email address");
        }
        if self.password.chars().count() < 6 {
            errors.push("password", "must be at least 6 characters");
        }
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<i64>,
    pub stock: Option<i64>,
}

impl CreateProductRequest {
    /// Presence checks; range checks live in `Product::create`.
    pub fn into_new_product(self) -> Result<NewProduct, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.price.is_none() {
            errors.push("price", "is required");
        }
        if self.stock.is_none() {
            errors.push("stock", "is required");
        }
        errors.into_result()?;

        Ok(NewProduct {
            name: self.name,
            description: self.description,
            price: self.price.unwrap_or_default(),
            stock: self.stock.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub product_id: String,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), self.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    json!({
        "id": p.id.to_string(),
        "name": p.name,
        "description": p.description,
        "price": p.price,
        "stock": p.stock,
        "createdBy": p.created_by.to_string(),
        "createdAt": p.created_at,
        "updatedAt": p.updated_at,
    })
}

pub fn page_meta_to_json(page: &Pagination, total: u64) -> serde_json::Value {
    json!({
        "page": page.page(),
        "limit": page.limit(),
        "total": total,
        "totalPages": page.total_pages(total),
    })
}
