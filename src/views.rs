//! Derived read-only views over a [`RootState`] snapshot

use crate::state::RootState;
use burger_types::{Ingredient, IngredientCategory, IngredientId, Order, SelectedIngredient, User};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// What the order modal should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded { number: u64 },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthStatus {
    /// Session check has not resolved yet
    Unknown,
    Anonymous,
    Authenticated { user: User },
}

/// One ingredient row of an order, repeated uses collapsed into `count`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub ingredient: Ingredient,
    pub count: usize,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.ingredient.price * Decimal::from(self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

impl RootState {
    pub fn bun(&self) -> Option<&SelectedIngredient> {
        self.constructor.bun.as_ref()
    }

    pub fn fillings(&self) -> &[SelectedIngredient] {
        &self.constructor.fillings
    }

    pub fn total_price(&self) -> Decimal {
        self.constructor.total_price()
    }

    pub fn ingredient_counts(&self) -> HashMap<IngredientId, usize> {
        self.constructor.ingredient_counts()
    }

    pub fn ingredients_by_category(&self, category: IngredientCategory) -> Vec<&Ingredient> {
        self.ingredients.by_category(category).collect()
    }

    pub fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.find(id)
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user.as_ref()
    }

    pub fn submission_status(&self) -> SubmissionStatus {
        let order = &self.order;
        if order.is_submitting {
            SubmissionStatus::Submitting
        } else if let Some(message) = &order.error {
            SubmissionStatus::Failed {
                message: message.clone(),
            }
        } else if let Some(placed) = &order.order {
            SubmissionStatus::Succeeded {
                number: placed.number,
            }
        } else {
            SubmissionStatus::Idle
        }
    }

    pub fn auth_status(&self) -> AuthStatus {
        match (&self.auth.user, self.auth.is_auth_checked) {
            (Some(user), _) => AuthStatus::Authenticated { user: user.clone() },
            (None, true) => AuthStatus::Anonymous,
            (None, false) => AuthStatus::Unknown,
        }
    }

    /// Details of the order currently held by the order slice
    pub fn order_details(&self) -> Option<OrderDetails> {
        let order = self.order.order.as_ref()?;
        order_details(order, &self.ingredients.items)
    }
}

/// Resolve an order's ingredient ids against the catalog.
///
/// Lines appear in first-appearance order; ids missing from the catalog are
/// skipped. `None` while the catalog is still empty.
pub fn order_details(order: &Order, catalog: &[Ingredient]) -> Option<OrderDetails> {
    if catalog.is_empty() {
        return None;
    }

    let mut lines: Vec<OrderLine> = Vec::new();
    let mut positions: HashMap<&IngredientId, usize> = HashMap::new();
    for id in &order.ingredients {
        if let Some(&index) = positions.get(id) {
            lines[index].count += 1;
            continue;
        }
        if let Some(ingredient) = catalog.iter().find(|i| &i.id == id) {
            positions.insert(id, lines.len());
            lines.push(OrderLine {
                ingredient: ingredient.clone(),
                count: 1,
            });
        }
    }

    let total = lines.iter().map(OrderLine::subtotal).sum();
    Some(OrderDetails {
        order: order.clone(),
        lines,
        total,
    })
}
