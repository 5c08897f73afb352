//! `shopcore-infra` — storage seams and in-memory implementations.
//!
//! The API layer talks to the trait objects in [`store`]; the in-memory
//! implementations in [`memory`] back tests and single-process deployments.
//! A durable backend plugs in at the same seam.

pub mod memory;
pub mod store;

pub use memory::{InMemoryOrderStore, InMemoryProductStore, InMemoryUserStore};
pub use store::{OrderStore, ProductStore, StoreError, UpdateError, UserStore};
