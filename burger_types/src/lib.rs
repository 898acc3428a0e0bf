//! Burger Types - Level 1 Foundation Types
//!
//! Pure data structures shared by every layer of the storefront: catalog
//! ingredients, constructor selections, orders and users. The wire names
//! follow the Stellar Burgers REST API (`_id`, `type`, `createdAt`, ...).
//!
//! ## Critical Rules
//!
//! 1. **NO BUSINESS LOGIC** - Only data structures
//! 2. **NO FUNCTIONS** - Except basic constructors and accessors
//! 3. **NO WORKSPACE DEPENDENCIES** - Cannot depend on other workspace crates
//! 4. **SERIALIZABLE** - All types must support serde
//! 5. **THREAD SAFE** - All types are Send + Sync

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// CATALOG
// ============================================================================

/// Stable identifier of an ingredient as known to the ingredient source
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(String);

impl IngredientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IngredientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for IngredientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Ingredient category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    /// Top and bottom of the stack; at most one per burger
    Bun,
    Main,
    Sauce,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 3] = [
        IngredientCategory::Bun,
        IngredientCategory::Main,
        IngredientCategory::Sauce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Bun => "bun",
            IngredientCategory::Main => "main",
            IngredientCategory::Sauce => "sauce",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ingredient category '{0}', expected bun, main or sauce")]
pub struct ParseCategoryError(pub String);

impl FromStr for IngredientCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bun" => Ok(IngredientCategory::Bun),
            "main" => Ok(IngredientCategory::Main),
            "sauce" => Ok(IngredientCategory::Sauce),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// A purchasable ingredient. Immutable once fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: IngredientId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: IngredientCategory,
    /// Unit price
    pub price: Decimal,
    #[serde(default)]
    pub proteins: u32,
    #[serde(default)]
    pub fat: u32,
    #[serde(default)]
    pub carbohydrates: u32,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_mobile: String,
    #[serde(default)]
    pub image_large: String,
}

impl Ingredient {
    /// Create an ingredient with no nutrition or image data
    pub fn new(
        id: impl Into<IngredientId>,
        name: impl Into<String>,
        category: IngredientCategory,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            price,
            proteins: 0,
            fat: 0,
            carbohydrates: 0,
            calories: 0,
            image: String::new(),
            image_mobile: String::new(),
            image_large: String::new(),
        }
    }

    pub fn is_bun(&self) -> bool {
        self.category == IngredientCategory::Bun
    }
}

// ============================================================================
// CONSTRUCTOR SELECTIONS
// ============================================================================

/// Per-selection token distinguishing repeated uses of the same catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog ingredient placed in the constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedIngredient {
    pub instance_id: InstanceId,
    #[serde(flatten)]
    pub ingredient: Ingredient,
}

impl SelectedIngredient {
    pub fn new(instance_id: InstanceId, ingredient: Ingredient) -> Self {
        Self {
            instance_id,
            ingredient,
        }
    }

    /// Catalog identity of the underlying ingredient
    pub fn ingredient_id(&self) -> &IngredientId {
        &self.ingredient.id
    }

    pub fn price(&self) -> Decimal {
        self.ingredient.price
    }
}

// ============================================================================
// ORDERS
// ============================================================================

/// Server-side order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Created,
    Pending,
    Done,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Pending => "pending",
            OrderStatus::Done => "done",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed order.
///
/// The order-creation endpoint may answer with little more than the number,
/// so everything except `number` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Server-assigned order number
    pub number: u64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Flat ingredient identities, bun counted at both ends of the stack
    #[serde(default)]
    pub ingredients: Vec<IngredientId>,
}

impl Order {
    pub fn new(number: u64) -> Self {
        Self {
            id: None,
            number,
            status: OrderStatus::default(),
            name: String::new(),
            created_at: None,
            updated_at: None,
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<IngredientId>) -> Self {
        self.ingredients = ingredients;
        self
    }
}

/// One page of orders as returned by the feed and history endpoints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_today: u64,
}

// ============================================================================
// USERS
// ============================================================================

/// Authenticated user identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
