//! Constructor slice: the burger being assembled
//!
//! One bun slot plus an ordered list of fillings. The filling order is the
//! visual stacking order and is what the server receives.

use burger_types::{IngredientId, InstanceId, SelectedIngredient};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructorStatus {
    #[default]
    Idle,
    Loading,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConstructorState {
    pub bun: Option<SelectedIngredient>,
    pub fillings: Vec<SelectedIngredient>,
    pub status: ConstructorStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorCommand {
    /// Place an ingredient that already carries its fresh instance id
    Add(SelectedIngredient),
    Remove(InstanceId),
    Move { from: usize, to: usize },
    Clear,
}

impl ConstructorCommand {
    pub fn label(&self) -> &'static str {
        match self {
            ConstructorCommand::Add(_) => "constructor/add",
            ConstructorCommand::Remove(_) => "constructor/remove",
            ConstructorCommand::Move { .. } => "constructor/move",
            ConstructorCommand::Clear => "constructor/clear",
        }
    }
}

impl ConstructorState {
    pub fn apply(&self, command: ConstructorCommand) -> Self {
        match command {
            ConstructorCommand::Add(selected) => self.with_added(selected),
            ConstructorCommand::Remove(instance_id) => self.without(instance_id),
            ConstructorCommand::Move { from, to } => self.with_moved(from, to),
            ConstructorCommand::Clear => Self::default(),
        }
    }

    fn with_added(&self, selected: SelectedIngredient) -> Self {
        if self.contains_instance(selected.instance_id) {
            warn!(
                instance_id = %selected.instance_id,
                "instance id already live in constructor, ignoring add"
            );
            return self.clone();
        }

        let mut next = self.clone();
        if selected.ingredient.is_bun() {
            next.bun = Some(selected);
        } else {
            next.fillings.push(selected);
        }
        next
    }

    fn without(&self, instance_id: InstanceId) -> Self {
        if !self.fillings.iter().any(|f| f.instance_id == instance_id) {
            return self.clone();
        }
        Self {
            bun: self.bun.clone(),
            fillings: self
                .fillings
                .iter()
                .filter(|f| f.instance_id != instance_id)
                .cloned()
                .collect(),
            status: self.status,
        }
    }

    fn with_moved(&self, from: usize, to: usize) -> Self {
        let len = self.fillings.len();
        if from >= len || to >= len || from == to {
            return self.clone();
        }

        let mut next = self.clone();
        let item = next.fillings.remove(from);
        next.fillings.insert(to, item);
        next
    }

    pub fn contains_instance(&self, instance_id: InstanceId) -> bool {
        self.bun
            .as_ref()
            .is_some_and(|bun| bun.instance_id == instance_id)
            || self.fillings.iter().any(|f| f.instance_id == instance_id)
    }

    pub fn is_empty(&self) -> bool {
        self.bun.is_none() && self.fillings.is_empty()
    }

    /// Bun counts twice: it is both the top and the bottom of the stack
    pub fn total_price(&self) -> Decimal {
        let bun = self
            .bun
            .as_ref()
            .map(|bun| bun.price() * Decimal::from(2))
            .unwrap_or_default();
        self.fillings.iter().map(|f| f.price()).fold(bun, |acc, p| acc + p)
    }

    /// `[bun, ...fillings, bun]`, or `None` while there is no bun
    pub fn order_ingredient_ids(&self) -> Option<Vec<IngredientId>> {
        let bun = self.bun.as_ref()?;
        let mut ids = Vec::with_capacity(self.fillings.len() + 2);
        ids.push(bun.ingredient_id().clone());
        ids.extend(self.fillings.iter().map(|f| f.ingredient_id().clone()));
        ids.push(bun.ingredient_id().clone());
        Some(ids)
    }

    /// How many times each catalog ingredient appears in the stack
    pub fn ingredient_counts(&self) -> HashMap<IngredientId, usize> {
        let mut counts = HashMap::new();
        if let Some(bun) = &self.bun {
            counts.insert(bun.ingredient_id().clone(), 2);
        }
        for filling in &self.fillings {
            *counts.entry(filling.ingredient_id().clone()).or_insert(0) += 1;
        }
        counts
    }
}
