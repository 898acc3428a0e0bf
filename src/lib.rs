//! Burger Builder - storefront core
//!
//! Client-side state for a burger storefront: an ingredient catalog, a
//! constructor holding one bun and an ordered list of fillings, and an
//! order submission flow gated by authentication.
//!
//! ## Architecture
//! Every change flows through one store:
//! Operation -> Command -> pure slice transition -> Store (watch channel) -> Views
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use burger_builder::{HttpBurgerApi, Storefront, Store, StorefrontConfig};
//! use burger_builder::api::MemoryCredentialStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = StorefrontConfig::from_env()?;
//! let api = HttpBurgerApi::new(&config, Arc::new(MemoryCredentialStore::new()))?;
//! let storefront = Storefront::new(Arc::new(Store::default()), Arc::new(api), config.routes);
//!
//! storefront.bootstrap().await;
//! let state = storefront.state();
//! if let Some(bun) = state.ingredients.items.iter().find(|i| i.is_bun()) {
//!     storefront.store().add_ingredient(bun.clone());
//! }
//! println!("total: {}", storefront.state().total_price());
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Configuration
pub mod config;

// Instance ids and request tokens
pub mod ids;

// Slices, commands and the root state tree
pub mod state;
pub mod store;

// Derived read-only data
pub mod views;

// Route guard and redirects
pub mod navigation;

// External API boundary and its HTTP implementation
pub mod api;

// Async operations around the API
pub mod actions;

pub use actions::{PlaceOrderOutcome, Storefront};
pub use api::{BurgerApi, HttpBurgerApi};
pub use config::StorefrontConfig;
pub use error::{ApiError, ConfigError, OrderError};
pub use ids::{IdGenerator, RequestId, SequentialIdGenerator, UuidIdGenerator};
pub use navigation::{guard_route, Redirect, RouteAccess, RouteDecision};
pub use state::{Command, RootState};
pub use store::Store;
pub use views::{AuthStatus, OrderDetails, OrderLine, SubmissionStatus};

// Re-export the domain types crate
pub use burger_types;
