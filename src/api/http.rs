//! Stellar Burgers REST client
//!
//! Every endpoint answers with a JSON envelope `{ "success": bool, ... }`.
//! A non-2xx status, an unparseable body or `success != true` all become an
//! [`ApiError`] carrying the envelope's `message` and the HTTP status.

use super::credentials::{CredentialStore, MemoryCredentialStore, Tokens};
use super::{BurgerApi, Result, UserUpdate};
use crate::config::StorefrontConfig;
use crate::error::{messages, ApiError};
use anyhow::Context;
use async_trait::async_trait;
use burger_types::{Ingredient, IngredientId, Order, OrdersPage, User};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// HTTP implementation of [`BurgerApi`]
pub struct HttpBurgerApi {
    http: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpBurgerApi {
    /// Create a client from environment configuration with in-memory credentials
    pub fn from_env() -> anyhow::Result<Self> {
        let config = StorefrontConfig::from_env().context("Failed to load storefront config")?;
        Self::new(&config, Arc::new(MemoryCredentialStore::new()))
    }

    pub fn new(
        config: &StorefrontConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            credentials,
        })
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::new(format!("Invalid endpoint '{}': {}", path, e)))
    }

    /// One round trip, no retry
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authorized: bool,
    ) -> Result<Value> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "api request");

        let mut request = self.http.request(method, url);
        if authorized {
            if let Some(token) = self.credentials.access_token() {
                request = request.header(reqwest::header::AUTHORIZATION, token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        decode_envelope(status, &text)
    }

    /// Authorized round trip that refreshes an expired access token once
    async fn send_authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        match self.send(method.clone(), path, body, true).await {
            Err(error) if error.is_token_expired() => {
                debug!(path, "access token expired, refreshing");
                self.refresh_tokens().await?;
                self.send(method, path, body, true).await
            }
            other => other,
        }
    }

    async fn refresh_tokens(&self) -> Result<()> {
        let refresh = self
            .credentials
            .refresh_token()
            .ok_or_else(|| ApiError::new(messages::NOT_AUTHENTICATED).with_status(401))?;

        let body = json!({ "token": refresh });
        match self.send(Method::POST, "auth/token", Some(&body), false).await {
            Ok(mut envelope) => {
                self.credentials.store(take_tokens(&mut envelope)?);
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "token refresh failed, dropping credentials");
                self.credentials.clear();
                Err(error)
            }
        }
    }

    /// Login and register share the response shape
    async fn authenticate(&self, path: &str, body: Value) -> Result<User> {
        let mut envelope = self.send(Method::POST, path, Some(&body), false).await?;
        let tokens = take_tokens(&mut envelope)?;
        let user = take_field(&mut envelope, "user")?;
        self.credentials.store(tokens);
        Ok(user)
    }
}

#[async_trait]
impl BurgerApi for HttpBurgerApi {
    async fn fetch_ingredients(&self) -> Result<Vec<Ingredient>> {
        let mut envelope = self.send(Method::GET, "ingredients", None, false).await?;
        take_field(&mut envelope, "data")
    }

    async fn submit_order(&self, ingredients: &[IngredientId]) -> Result<Order> {
        let body = json!({ "ingredients": ingredients });
        let envelope = self.send_authorized(Method::POST, "orders", Some(&body)).await?;
        decode_created_order(envelope)
    }

    async fn current_user(&self) -> Result<User> {
        let mut envelope = self.send_authorized(Method::GET, "auth/user", None).await?;
        if envelope.get("user").map_or(true, Value::is_null) {
            return Err(ApiError::new(messages::USER_NOT_FOUND));
        }
        take_field(&mut envelope, "user")
    }

    async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.authenticate("auth/login", json!({ "email": email, "password": password }))
            .await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        self.authenticate(
            "auth/register",
            json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    async fn logout(&self) -> Result<()> {
        let body = json!({ "token": self.credentials.refresh_token().unwrap_or_default() });
        let result = self.send(Method::POST, "auth/logout", Some(&body), false).await;
        // Local credentials go either way
        self.credentials.clear();
        result.map(|_| ())
    }

    async fn update_user(&self, update: &UserUpdate) -> Result<User> {
        let body = serde_json::to_value(update).map_err(|e| ApiError::new(e.to_string()))?;
        let mut envelope = self
            .send_authorized(Method::PATCH, "auth/user", Some(&body))
            .await?;
        take_field(&mut envelope, "user")
    }

    async fn fetch_feed(&self) -> Result<OrdersPage> {
        let envelope = self.send(Method::GET, "orders/all", None, false).await?;
        decode_orders_page(envelope)
    }

    async fn fetch_user_orders(&self) -> Result<OrdersPage> {
        let envelope = self.send_authorized(Method::GET, "orders", None).await?;
        decode_orders_page(envelope)
    }

    async fn lookup_order_by_number(&self, number: u64) -> Result<Option<Order>> {
        let envelope = self
            .send(Method::GET, &format!("orders/{}", number), None, false)
            .await?;
        let page = decode_orders_page(envelope)?;
        Ok(page.orders.into_iter().next())
    }
}

// ============================================================================
// Envelope decoding
// ============================================================================

/// Turn a raw response into the envelope object, or the normalized failure
pub fn decode_envelope(status: u16, body: &str) -> Result<Value> {
    let ok_status = (200..300).contains(&status);
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if ok_status => {
            return Err(ApiError::new(format!("Malformed response: {}", e)).with_status(status))
        }
        Err(_) => {
            return Err(ApiError {
                message: None,
                status: Some(status),
            })
        }
    };

    let success = value.get("success").and_then(Value::as_bool) == Some(true);
    if ok_status && success {
        return Ok(value);
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    Err(ApiError {
        message,
        status: Some(status),
    })
}

fn take_field<T: DeserializeOwned>(envelope: &mut Value, key: &str) -> Result<T> {
    let value = envelope
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ApiError::new(format!("Response is missing '{}'", key)))?;
    serde_json::from_value(value)
        .map_err(|e| ApiError::new(format!("Malformed '{}' in response: {}", key, e)))
}

fn take_tokens(envelope: &mut Value) -> Result<Tokens> {
    let access: String = take_field(envelope, "accessToken")?;
    let refresh: String = take_field(envelope, "refreshToken")?;
    Ok(Tokens::new(access, refresh))
}

/// Orders may embed full ingredient objects; reduce them to their ids
fn flatten_ingredients(order: &mut Value) {
    if let Some(Value::Array(items)) = order.get_mut("ingredients") {
        for item in items.iter_mut() {
            let id = item.get("_id").and_then(Value::as_str).map(str::to_string);
            if let Some(id) = id {
                *item = Value::String(id);
            }
        }
    }
}

fn decode_created_order(mut envelope: Value) -> Result<Order> {
    let mut raw = envelope
        .get_mut("order")
        .map(Value::take)
        .filter(|v| v.is_object())
        .ok_or_else(|| ApiError::new(messages::ORDER_FAILED))?;
    flatten_ingredients(&mut raw);

    let mut order: Order = serde_json::from_value(raw)
        .map_err(|e| ApiError::new(format!("Malformed order in response: {}", e)))?;
    if order.name.is_empty() {
        if let Some(name) = envelope.get("name").and_then(Value::as_str) {
            order.name = name.to_string();
        }
    }
    Ok(order)
}

fn decode_orders_page(mut envelope: Value) -> Result<OrdersPage> {
    if let Some(Value::Array(orders)) = envelope.get_mut("orders") {
        orders.iter_mut().for_each(flatten_ingredients);
    }
    serde_json::from_value(envelope)
        .map_err(|e| ApiError::new(format!("Malformed orders in response: {}", e)))
}
