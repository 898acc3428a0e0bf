//! Property tests for the constructor slice

use burger_builder::ids::{IdGenerator, SequentialIdGenerator};
use burger_builder::state::{ConstructorCommand, ConstructorState};
use burger_types::{Ingredient, IngredientCategory, SelectedIngredient};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(IngredientCategory, u32),
    RemoveNth(usize),
    RemoveUnknown,
    Move(usize, usize),
    Clear,
}

// -- Strategy helpers --

fn arb_category() -> impl Strategy<Value = IngredientCategory> {
    prop_oneof![
        Just(IngredientCategory::Bun),
        Just(IngredientCategory::Main),
        Just(IngredientCategory::Sauce),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (arb_category(), 1u32..5000).prop_map(|(c, p)| Op::Add(c, p)),
        2 => (0usize..16).prop_map(Op::RemoveNth),
        1 => Just(Op::RemoveUnknown),
        3 => (0usize..12, 0usize..12).prop_map(|(a, b)| Op::Move(a, b)),
        1 => Just(Op::Clear),
    ]
}

fn ingredient(n: usize, category: IngredientCategory, price: u32) -> Ingredient {
    Ingredient::new(
        format!("{}-{}", category, n),
        format!("{} #{}", category, n),
        category,
        Decimal::from(price),
    )
}

fn fillings_of(n: usize) -> (ConstructorState, SequentialIdGenerator) {
    let ids = SequentialIdGenerator::new();
    let mut state = ConstructorState::default();
    for i in 0..n {
        let selected =
            SelectedIngredient::new(ids.next_id(), ingredient(i, IngredientCategory::Main, 10));
        state = state.apply(ConstructorCommand::Add(selected));
    }
    (state, ids)
}

fn expected_price(state: &ConstructorState) -> Decimal {
    let bun = state
        .bun
        .as_ref()
        .map(|b| b.ingredient.price * Decimal::from(2))
        .unwrap_or(Decimal::ZERO);
    state
        .fillings
        .iter()
        .fold(bun, |acc, f| acc + f.ingredient.price)
}

proptest! {
    #[test]
    fn invariants_hold_under_any_sequence(ops in prop::collection::vec(arb_op(), 0..60)) {
        let ids = SequentialIdGenerator::new();
        let mut state = ConstructorState::default();

        for (n, op) in ops.into_iter().enumerate() {
            state = match op {
                Op::Add(category, price) => {
                    let selected =
                        SelectedIngredient::new(ids.next_id(), ingredient(n, category, price));
                    state.apply(ConstructorCommand::Add(selected))
                }
                Op::RemoveNth(i) => match state.fillings.get(i) {
                    Some(f) => state.apply(ConstructorCommand::Remove(f.instance_id)),
                    None => state.clone(),
                },
                Op::RemoveUnknown => {
                    let unknown = SequentialIdGenerator::nth(u64::MAX);
                    let next = state.apply(ConstructorCommand::Remove(unknown));
                    prop_assert_eq!(&next, &state);
                    next
                }
                Op::Move(from, to) => state.apply(ConstructorCommand::Move { from, to }),
                Op::Clear => state.apply(ConstructorCommand::Clear),
            };

            prop_assert!(state.fillings.iter().all(|f| !f.ingredient.is_bun()));
            prop_assert!(state.bun.as_ref().map_or(true, |b| b.ingredient.is_bun()));

            let mut seen = HashSet::new();
            for instance in state.bun.iter().chain(state.fillings.iter()).map(|s| s.instance_id) {
                prop_assert!(seen.insert(instance), "duplicate instance id {}", instance);
            }

            prop_assert_eq!(state.total_price(), expected_price(&state));
            prop_assert!(state.total_price() >= Decimal::ZERO);
        }
    }

    #[test]
    fn move_relocates_one_and_keeps_the_rest(len in 1usize..10, from in 0usize..10, to in 0usize..10) {
        let (state, _) = fillings_of(len);
        let next = state.apply(ConstructorCommand::Move { from, to });

        if from >= len || to >= len {
            prop_assert_eq!(&next, &state);
            return Ok(());
        }

        prop_assert_eq!(next.fillings.len(), len);
        prop_assert_eq!(next.fillings[to].instance_id, state.fillings[from].instance_id);

        let others_before: Vec<_> = state
            .fillings
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != from)
            .map(|(_, f)| f.instance_id)
            .collect();
        let others_after: Vec<_> = next
            .fillings
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != to)
            .map(|(_, f)| f.instance_id)
            .collect();
        prop_assert_eq!(others_before, others_after);
        prop_assert_eq!(next.total_price(), state.total_price());
    }

    #[test]
    fn bun_replacement_never_duplicates(prices in prop::collection::vec(1u32..1000, 1..10)) {
        let ids = SequentialIdGenerator::new();
        let mut state = ConstructorState::default();
        for (n, price) in prices.iter().enumerate() {
            let bun = ingredient(n, IngredientCategory::Bun, *price);
            let selected = SelectedIngredient::new(ids.next_id(), bun);
            state = state.apply(ConstructorCommand::Add(selected));
        }

        let last = *prices.last().unwrap();
        prop_assert!(state.fillings.is_empty());
        prop_assert_eq!(state.bun.as_ref().map(|b| b.ingredient.price), Some(Decimal::from(last)));
        prop_assert_eq!(state.total_price(), Decimal::from(last) * Decimal::from(2));
        prop_assert_eq!(state.order_ingredient_ids().map(|ids| ids.len()), Some(2));
    }
}
