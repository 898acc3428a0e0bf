//! Shared fixtures: an in-memory BurgerApi and a small catalog

#![allow(dead_code)]

use async_trait::async_trait;
use burger_builder::api::{self, BurgerApi, UserUpdate};
use burger_builder::config::RouteConfig;
use burger_builder::{ApiError, SequentialIdGenerator, Store, Storefront};
use burger_types::{Ingredient, IngredientCategory, IngredientId, Order, OrdersPage, User};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const BUN: &str = "bun-1";
pub const PATTY: &str = "main-1";
pub const SAUCE: &str = "sauce-1";

pub fn catalog() -> Vec<Ingredient> {
    vec![
        Ingredient::new(BUN, "Краторная булка", IngredientCategory::Bun, Decimal::from(20)),
        Ingredient::new(PATTY, "Биокотлета", IngredientCategory::Main, Decimal::from(50)),
        Ingredient::new(SAUCE, "Соус Spicy-X", IngredientCategory::Sauce, Decimal::from(5)),
    ]
}

pub fn ingredient(id: &str) -> Ingredient {
    catalog()
        .into_iter()
        .find(|i| i.id.as_str() == id)
        .expect("fixture ingredient")
}

pub fn test_user() -> User {
    User::new("Test User", "test@example.com")
}

/// Scriptable BurgerApi that records what it was asked
pub struct StubApi {
    pub catalog: Mutex<Result<Vec<Ingredient>, ApiError>>,
    pub session: Mutex<Option<User>>,
    pub login_result: Mutex<Result<User, ApiError>>,
    pub order_result: Mutex<Result<Order, ApiError>>,
    pub feed: Mutex<OrdersPage>,
    pub lookup_result: Mutex<Result<Option<Order>, ApiError>>,
    /// When set, `submit_order` waits for a notification before answering
    pub submit_gate: Option<Arc<Notify>>,
    pub submitted: Mutex<Vec<Vec<IngredientId>>>,
    pub submit_calls: AtomicUsize,
    pub lookup_calls: AtomicUsize,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            catalog: Mutex::new(Ok(catalog())),
            session: Mutex::new(None),
            login_result: Mutex::new(Ok(test_user())),
            order_result: Mutex::new(Ok(Order::new(85340))),
            feed: Mutex::new(OrdersPage::default()),
            lookup_result: Mutex::new(Ok(None)),
            submit_gate: None,
            submitted: Mutex::new(Vec::new()),
            submit_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
        }
    }
}

impl StubApi {
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let api = Self {
            submit_gate: Some(gate.clone()),
            ..Default::default()
        };
        (api, gate)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn last_submitted(&self) -> Option<Vec<String>> {
        self.submitted
            .lock()
            .unwrap()
            .last()
            .map(|ids| ids.iter().map(|id| id.to_string()).collect())
    }
}

fn unauthorized() -> ApiError {
    ApiError::new("You should be authorised").with_status(401)
}

#[async_trait]
impl BurgerApi for StubApi {
    async fn fetch_ingredients(&self) -> api::Result<Vec<Ingredient>> {
        self.catalog.lock().unwrap().clone()
    }

    async fn submit_order(&self, ingredients: &[IngredientId]) -> api::Result<Order> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(ingredients.to_vec());
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }
        self.order_result.lock().unwrap().clone()
    }

    async fn current_user(&self) -> api::Result<User> {
        self.session.lock().unwrap().clone().ok_or_else(unauthorized)
    }

    async fn login(&self, _email: &str, _password: &str) -> api::Result<User> {
        let result = self.login_result.lock().unwrap().clone();
        if let Ok(user) = &result {
            *self.session.lock().unwrap() = Some(user.clone());
        }
        result
    }

    async fn register(&self, name: &str, email: &str, _password: &str) -> api::Result<User> {
        let user = User::new(name, email);
        *self.session.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn logout(&self) -> api::Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn update_user(&self, update: &UserUpdate) -> api::Result<User> {
        let mut session = self.session.lock().unwrap();
        if session.is_none() {
            return Err(unauthorized());
        }
        let user = User::new(&update.name, &update.email);
        *session = Some(user.clone());
        Ok(user)
    }

    async fn fetch_feed(&self) -> api::Result<OrdersPage> {
        Ok(self.feed.lock().unwrap().clone())
    }

    async fn fetch_user_orders(&self) -> api::Result<OrdersPage> {
        if self.session.lock().unwrap().is_none() {
            return Err(unauthorized());
        }
        Ok(self.feed.lock().unwrap().clone())
    }

    async fn lookup_order_by_number(&self, _number: u64) -> api::Result<Option<Order>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup_result.lock().unwrap().clone()
    }
}

pub fn storefront(api: Arc<StubApi>) -> Storefront {
    let store = Arc::new(Store::new(Arc::new(SequentialIdGenerator::new())));
    Storefront::new(store, api, RouteConfig::default())
}
