//! `shopcore-catalog` — product catalog domain.

pub mod product;

pub use product::{MAX_PRICE, NewProduct, Product, ProductPatch};
