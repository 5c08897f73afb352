//! Service wiring: stores and the token service, built once per process
//! (or per test server) and shared through an `Extension`.

use std::sync::Arc;

use shopcore_auth::Hs256TokenService;
use shopcore_infra::{
    InMemoryOrderStore, InMemoryProductStore, InMemoryUserStore, OrderStore, ProductStore,
    UserStore,
};

pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub tokens: Arc<Hs256TokenService>,
}

pub fn build_services(tokens: Arc<Hs256TokenService>) -> AppServices {
    AppServices {
        users: Arc::new(InMemoryUserStore::new()),
        products: Arc::new(InMemoryProductStore::new()),
        orders: Arc::new(InMemoryOrderStore::new()),
        tokens,
    }
}
