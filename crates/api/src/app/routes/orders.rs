use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};
use chrono::Utc;

use shopcore_auth::Role;
use shopcore_core::{OrderId, ProductId, ValidationErrors};
use shopcore_orders::{Order, validate_quantity};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new().route("/", post(create_order))
}

/// Order placement: validate → atomically decrement stock → persist order.
///
/// The stock check and decrement are one conditional update at the store, so
/// two concurrent orders against marginally sufficient stock cannot both
/// pass; the loser gets `Insufficient stock` and the product is untouched.
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    ctx: Option<Extension<AuthContext>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let ctx = match authz::require_role(ctx.as_deref(), Role::User) {
        Ok(ctx) => *ctx,
        Err(e) => return errors::role_error_to_response(e),
    };

    let mut field_errors = ValidationErrors::new();

    let product_id = if body.product_id.trim().is_empty() {
        field_errors.push("productId", "must not be empty");
        None
    } else {
        match body.product_id.parse::<ProductId>() {
            Ok(id) => Some(id),
            Err(_) => {
                field_errors.push("productId", "must be a valid product id");
                None
            }
        }
    };

    let quantity = match body.quantity {
        None => {
            field_errors.push("quantity", "is required");
            None
        }
        Some(raw) => match u32::try_from(raw) {
            Ok(q) => match validate_quantity(q) {
                Ok(()) => Some(q),
                Err(e) => {
                    field_errors.merge(e);
                    None
                }
            },
            Err(_) => {
                let message = if raw < 1 {
                    "must be at least 1"
                } else {
                    "is out of range"
                };
                field_errors.push("quantity", message);
                None
            }
        },
    };

    let (Some(product_id), Some(quantity)) = (product_id, quantity) else {
        return errors::validation_failed(&field_errors);
    };

    let now = Utc::now();

    let product = match services.products.decrement_stock(product_id, quantity, now) {
        Ok(product) => product,
        Err(e) => return errors::store_error_to_response(e, "Product"),
    };

    // Caller identity from the gatekeeper context; price snapshotted from
    // the product as of the decrement.
    let order = match Order::place(OrderId::new(), ctx.user_id(), &product, quantity, now) {
        Ok(order) => order,
        Err(e) => return errors::validation_failed(&e),
    };

    if let Err(e) = services.orders.insert(order.clone()) {
        return errors::store_error_to_response(e, "Order");
    }

    tracing::info!(
        order_id = %order.id,
        product_id = %product_id,
        quantity,
        total_price = order.total_price,
        "order placed"
    );

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "orderId": order.id.to_string(),
        })),
    )
        .into_response()
}
