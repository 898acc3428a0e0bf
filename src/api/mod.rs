//! BurgerApi trait: the sole boundary between the storefront core and the
//! remote REST API. Orchestration depends on this trait, never on reqwest.

pub mod credentials;
pub mod http;

pub use credentials::{CredentialStore, MemoryCredentialStore, Tokens};
pub use http::HttpBurgerApi;

use crate::error::ApiError;
use async_trait::async_trait;
use burger_types::{Ingredient, IngredientId, Order, OrdersPage, User};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Profile fields to change. The password is only sent when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

#[async_trait]
pub trait BurgerApi: Send + Sync {
    async fn fetch_ingredients(&self) -> Result<Vec<Ingredient>>;

    /// Submit `[bun, ...fillings, bun]`; the server answers with the order number
    async fn submit_order(&self, ingredients: &[IngredientId]) -> Result<Order>;

    // ── Session ────────────────────────────────────────────────

    /// User behind the stored credentials, if they are still valid
    async fn current_user(&self) -> Result<User>;

    async fn login(&self, email: &str, password: &str) -> Result<User>;

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User>;

    async fn logout(&self) -> Result<()>;

    async fn update_user(&self, update: &UserUpdate) -> Result<User>;

    // ── Orders ─────────────────────────────────────────────────

    /// Public feed of recent orders
    async fn fetch_feed(&self) -> Result<OrdersPage>;

    /// Order history of the signed-in user
    async fn fetch_user_orders(&self) -> Result<OrdersPage>;

    /// `Ok(None)` when the server knows no such order
    async fn lookup_order_by_number(&self, number: u64) -> Result<Option<Order>>;
}
