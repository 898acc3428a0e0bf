//! Catalog slice: purchasable ingredients and their load status

use crate::ids::RequestId;
use burger_types::{Ingredient, IngredientCategory, IngredientId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IngredientsState {
    pub items: Vec<Ingredient>,
    pub is_loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub request: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngredientsCommand {
    FetchPending { request: RequestId },
    FetchFulfilled { request: RequestId, items: Vec<Ingredient> },
    FetchRejected { request: RequestId, message: String },
}

impl IngredientsCommand {
    pub fn label(&self) -> &'static str {
        match self {
            IngredientsCommand::FetchPending { .. } => "ingredients/fetch/pending",
            IngredientsCommand::FetchFulfilled { .. } => "ingredients/fetch/fulfilled",
            IngredientsCommand::FetchRejected { .. } => "ingredients/fetch/rejected",
        }
    }
}

impl IngredientsState {
    pub fn apply(&self, command: IngredientsCommand) -> Self {
        match command {
            IngredientsCommand::FetchPending { request } => Self {
                items: self.items.clone(),
                is_loading: true,
                error: None,
                request: Some(request),
            },
            IngredientsCommand::FetchFulfilled { request, items } => {
                if self.request != Some(request) {
                    return self.clone();
                }
                Self {
                    items,
                    is_loading: false,
                    error: None,
                    request: None,
                }
            }
            IngredientsCommand::FetchRejected { request, message } => {
                if self.request != Some(request) {
                    return self.clone();
                }
                Self {
                    items: self.items.clone(),
                    is_loading: false,
                    error: Some(message),
                    request: None,
                }
            }
        }
    }

    pub fn find(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn by_category(&self, category: IngredientCategory) -> impl Iterator<Item = &Ingredient> {
        self.items.iter().filter(move |item| item.category == category)
    }
}
