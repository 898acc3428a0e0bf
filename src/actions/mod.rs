//! Async storefront operations
//!
//! [`Storefront`] pairs the store with a [`BurgerApi`] and runs each remote
//! operation as `pending -> call -> fulfilled | rejected`. Every operation
//! records its outcome in the store before returning it, so callers may
//! ignore the return value and read state instead.
//!
//! The impl is split by area: catalog, order, auth, feed.

mod auth;
mod catalog;
mod feed;
mod order;

pub use order::PlaceOrderOutcome;

use crate::api::BurgerApi;
use crate::config::RouteConfig;
use crate::state::RootState;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct Storefront {
    store: Arc<Store>,
    api: Arc<dyn BurgerApi>,
    routes: RouteConfig,
}

impl Storefront {
    pub fn new(store: Arc<Store>, api: Arc<dyn BurgerApi>, routes: RouteConfig) -> Self {
        Self { store, api, routes }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    pub fn state(&self) -> RootState {
        self.store.state()
    }

    /// Session check and catalog load, run concurrently. Failures end up
    /// in their slices.
    pub async fn bootstrap(&self) {
        let (_auth, _catalog) = tokio::join!(self.check_auth(), self.load_ingredients());
    }
}
