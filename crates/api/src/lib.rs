//! HTTP API: router, gatekeeper middleware, role guard, and handlers.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
