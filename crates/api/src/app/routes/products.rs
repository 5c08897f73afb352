use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::Utc;

use shopcore_auth::Role;
use shopcore_catalog::Product;
use shopcore_core::{ProductId, ValidationErrors};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
}

/// Public, unauthenticated catalog browse.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListQuery>,
) -> axum::response::Response {
    let pagination = query.pagination();

    let page = match services.products.list(pagination) {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(error = %e, "product listing failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch products",
            );
        }
    };

    let data: Vec<_> = page.items.iter().map(dto::product_to_json).collect();
    Json(serde_json::json!({
        "data": data,
        "meta": dto::page_meta_to_json(&pagination, page.total),
    }))
    .into_response()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    ctx: Option<Extension<AuthContext>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let ctx = match authz::require_role(ctx.as_deref(), Role::Admin) {
        Ok(ctx) => *ctx,
        Err(e) => return errors::role_error_to_response(e),
    };

    let input = match body.into_new_product() {
        Ok(input) => input,
        Err(e) => return errors::validation_failed(&e),
    };

    // createdBy comes from the verified identity, never the body.
    let product = match Product::create(ProductId::new(), input, ctx.user_id(), Utc::now()) {
        Ok(product) => product,
        Err(e) => return errors::validation_failed(&e),
    };

    if let Err(e) = services.products.insert(product.clone()) {
        return errors::store_error_to_response(e, "Product");
    }

    tracing::info!(product_id = %product.id, "product created");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Product created successfully",
            "data": dto::product_to_json(&product),
        })),
    )
        .into_response()
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    ctx: Option<Extension<AuthContext>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    if let Err(e) = authz::require_role(ctx.as_deref(), Role::Admin) {
        return errors::role_error_to_response(e);
    }

    let id: ProductId = match id.parse() {
        Ok(id) => id,
        Err(_) => return invalid_product_id(),
    };

    let product = match services.products.update(id, body.into_patch(), Utc::now()) {
        Ok(product) => product,
        Err(e) => return errors::update_error_to_response(e, "Product"),
    };

    Json(serde_json::json!({
        "message": "Product updated successfully",
        "data": dto::product_to_json(&product),
    }))
    .into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    ctx: Option<Extension<AuthContext>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require_role(ctx.as_deref(), Role::Admin) {
        return errors::role_error_to_response(e);
    }

    let id: ProductId = match id.parse() {
        Ok(id) => id,
        Err(_) => return invalid_product_id(),
    };

    if let Err(e) = services.products.delete(id) {
        return errors::store_error_to_response(e, "Product");
    }

    tracing::info!(product_id = %id, "product deleted");

    Json(serde_json::json!({
        "message": "Product deleted successfully",
    }))
    .into_response()
}

fn invalid_product_id() -> axum::response::Response {
    let mut e = ValidationErrors::new();
    e.push("id", "must be a valid product id");
    errors::validation_failed(&e)
}
