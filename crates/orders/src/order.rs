use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopcore_catalog::Product;
use shopcore_core::{OrderId, ProductId, UserId, ValidationErrors};

/// Upper bound on units per order.
///
/// With [`shopcore_catalog::MAX_PRICE`] this bounds any total at
/// `10^12 * 10^6 = 10^18`, comfortably inside `u64`.
pub const MAX_ORDER_QUANTITY: u32 = 1_000_000;

/// Quantity shape check shared by the request DTO and [`Order::place`].
pub fn validate_quantity(quantity: u32) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if quantity < 1 {
        errors.push("quantity", "must be at least 1");
    } else if quantity > MAX_ORDER_QUANTITY {
        errors.push("quantity", "is out of range");
    }
    errors.into_result()
}

/// Order status lifecycle.
///
/// Orders are created in `Pending`; later transitions have no handler in
/// this core and are carried for the record shape only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

/// A placed order.
///
/// `total_price` is a snapshot of `product.price * quantity` taken at
/// placement time; later price edits do not affect existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total_price: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a pending order for `quantity` units of `product`.
    ///
    /// The caller identity must come from the verified request context,
    /// never from the request body. The product is expected to have already
    /// had its stock decremented atomically; this only snapshots the price.
    pub fn place(
        id: OrderId,
        user_id: UserId,
        product: &Product,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        validate_quantity(quantity)?;

        // price <= MAX_PRICE and quantity <= MAX_ORDER_QUANTITY, so the
        // product fits in u64.
        let total_price = product
            .price
            .checked_mul(u64::from(quantity))
            .ok_or_else(|| {
                let mut errors = ValidationErrors::new();
                errors.push("quantity", "is out of range");
                errors
            })?;

        Ok(Self {
            id,
            user_id,
            product_id: product.id,
            quantity,
            total_price,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcore_catalog::NewProduct;

    fn product(price: i64, stock: i64) -> Product {
        Product::create(
            ProductId::new(),
            NewProduct {
                name: "Widget".to_string(),
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
    fn placement_snapshots_price_times_quantity() {
        let p = product(10, 5);
        let order = Order::place(OrderId::new(), UserId::new(), &p, 2, Utc::now()).unwrap();

        assert_eq!(order.total_price, 20);
        assert_eq!(order.quantity, 2);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.product_id, p.id);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let p = product(10, 5);
        let errors = Order::place(OrderId::new(), UserId::new(), &p, 0, Utc::now()).unwrap_err();
        assert_eq!(errors.errors()[0].field, "quantity");
    }

    #[test]
    fn quantity_above_cap_is_rejected() {
        let p = product(10, 5);
        let errors = Order::place(
            OrderId::new(),
            UserId::new(),
            &p,
            MAX_ORDER_QUANTITY + 1,
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(errors.errors()[0].field, "quantity");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
