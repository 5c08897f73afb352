//! `shopcore-orders` — order placement domain.

pub mod order;

pub use order::{MAX_ORDER_QUANTITY, Order, OrderStatus, validate_quantity};
