//! `shopcore-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod pagination;

pub use error::{InvalidIdError, ValidationErrors};
pub use id::{OrderId, ProductId, UserId};
pub use pagination::{Page, Pagination};
