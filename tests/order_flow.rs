//! Constructor-to-order flow against a scripted API

mod common;

use burger_builder::error::messages;
use burger_builder::{ApiError, OrderError, PlaceOrderOutcome, Redirect, SubmissionStatus};
use burger_types::{IngredientId, Order};
use common::{ingredient, storefront, StubApi, BUN, PATTY, SAUCE};
use rust_decimal::Decimal;
use std::sync::Arc;

#[tokio::test]
async fn test_bun_and_patty_order_end_to_end() {
    let api = Arc::new(StubApi::default());
    let shop = storefront(api.clone());
    shop.load_ingredients().await.unwrap();
    shop.login("test@example.com", "password", None).await.unwrap();

    let store = shop.store();
    store.add_ingredient(ingredient(BUN));
    store.add_ingredient(ingredient(PATTY));
    assert_eq!(shop.state().total_price(), Decimal::from(90));

    let outcome = shop.place_order().await;
    let order = match outcome {
        PlaceOrderOutcome::Submitted(order) => order,
        other => panic!("expected submission, got {:?}", other),
    };
    assert_eq!(order.number, 85340);

    assert_eq!(
        api.last_submitted().unwrap(),
        vec![BUN.to_string(), PATTY.to_string(), BUN.to_string()]
    );

    let state = shop.state();
    assert_eq!(
        state.submission_status(),
        SubmissionStatus::Succeeded { number: 85340 }
    );
    assert!(state.constructor.is_empty());
    assert_eq!(state.total_price(), Decimal::ZERO);

    // Server answered with only a number; the submitted ids are kept
    let stored = state.order.order.as_ref().unwrap();
    assert_eq!(stored.ingredients.len(), 3);
    let details = state.order_details().unwrap();
    assert_eq!(details.total, Decimal::from(90));
}

#[tokio::test]
async fn test_unauthenticated_submit_redirects_to_login() {
    let api = Arc::new(StubApi::default());
    let shop = storefront(api.clone());
    shop.store().add_ingredient(ingredient(BUN));

    let outcome = shop.place_order().await;
    assert_eq!(
        outcome,
        PlaceOrderOutcome::Redirect(Redirect::to("/login").with_origin("/"))
    );
    assert_eq!(api.submit_calls(), 0);
    assert_eq!(shop.state().submission_status(), SubmissionStatus::Idle);
    assert!(shop.state().constructor.bun.is_some());
}

#[tokio::test]
async fn test_submit_without_bun_is_refused() {
    let api = Arc::new(StubApi::default());
    let shop = storefront(api.clone());
    shop.login("test@example.com", "password", None).await.unwrap();
    shop.store().add_ingredient(ingredient(PATTY));

    let outcome = shop.place_order().await;
    assert_eq!(outcome, PlaceOrderOutcome::Refused(OrderError::MissingBun));
    assert_eq!(api.submit_calls(), 0);

    let state = shop.state();
    assert_eq!(state.order.error.as_deref(), Some(messages::MISSING_BUN));
    assert!(!state.order.is_submitting);
    assert_eq!(
        state.submission_status(),
        SubmissionStatus::Failed {
            message: messages::MISSING_BUN.to_string()
        }
    );
    assert_eq!(state.constructor.fillings.len(), 1);
}

#[tokio::test]
async fn test_empty_sequence_fails_without_network() {
    let api = Arc::new(StubApi::default());
    let shop = storefront(api.clone());

    let result = shop.create_order(Vec::new()).await;
    assert_eq!(result, Err(OrderError::EmptyIngredients));
    assert_eq!(api.submit_calls(), 0);

    let state = shop.state();
    assert!(!state.order.is_submitting);
    assert_eq!(state.order.error.as_deref(), Some(messages::EMPTY_ORDER));
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_ignored() {
    let (api, gate) = StubApi::gated();
    let api = Arc::new(api);
    let shop = storefront(api.clone());
    shop.login("test@example.com", "password", None).await.unwrap();
    shop.store().add_ingredient(ingredient(BUN));

    let mut rx = shop.store().subscribe();
    let first = tokio::spawn({
        let shop = shop.clone();
        async move { shop.place_order().await }
    });
    rx.wait_for(|s| s.order.is_submitting).await.unwrap();

    assert_eq!(shop.place_order().await, PlaceOrderOutcome::Ignored);
    assert!(!rx.has_changed().unwrap());

    gate.notify_one();
    let outcome = first.await.unwrap();
    assert!(matches!(outcome, PlaceOrderOutcome::Submitted(ref o) if o.number == 85340));
    assert_eq!(api.submit_calls(), 1);

    // Exactly one submitting -> settled transition
    let mut submitting = true;
    let mut settled = 0;
    while rx.has_changed().unwrap() {
        let now = rx.borrow_and_update().order.is_submitting;
        if submitting && !now {
            settled += 1;
        }
        submitting = now;
    }
    assert_eq!(settled, 1);
    assert!(!submitting);
}

#[tokio::test]
async fn test_dismissed_submission_still_blocks_resubmit() {
    let (api, gate) = StubApi::gated();
    let api = Arc::new(api);
    let shop = storefront(api.clone());
    shop.login("test@example.com", "password", None).await.unwrap();
    shop.store().add_ingredient(ingredient(BUN));

    let mut rx = shop.store().subscribe();
    let first = tokio::spawn({
        let shop = shop.clone();
        async move { shop.place_order().await }
    });
    rx.wait_for(|s| s.order.is_submitting).await.unwrap();

    shop.store().clear_order_error();
    assert!(!shop.state().order.is_submitting);
    assert!(shop.state().order.is_in_flight());

    assert_eq!(shop.place_order().await, PlaceOrderOutcome::Ignored);
    assert_eq!(api.submit_calls(), 1);

    gate.notify_one();
    assert!(matches!(first.await.unwrap(), PlaceOrderOutcome::Submitted(_)));
    assert_eq!(api.submit_calls(), 1);

    let state = shop.state();
    assert_eq!(
        state.submission_status(),
        SubmissionStatus::Succeeded { number: 85340 }
    );
    assert!(!state.order.is_in_flight());
    assert!(state.constructor.is_empty());
}

#[tokio::test]
async fn test_concurrent_submits_reach_server_once() {
    let (api, gate) = StubApi::gated();
    let api = Arc::new(api);
    let shop = storefront(api.clone());
    shop.login("test@example.com", "password", None).await.unwrap();
    shop.store().add_ingredient(ingredient(BUN));

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let shop = shop.clone();
            tokio::spawn(async move { shop.place_order().await })
        })
        .collect();

    let mut rx = shop.store().subscribe();
    rx.wait_for(|s| s.order.is_submitting).await.unwrap();
    tokio::task::yield_now().await;
    gate.notify_one();

    let mut submitted = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            PlaceOrderOutcome::Submitted(_) => submitted += 1,
            // Late attempts find the constructor already cleared
            PlaceOrderOutcome::Ignored | PlaceOrderOutcome::Refused(_) => {}
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    assert_eq!(submitted, 1);
    assert_eq!(api.submit_calls(), 1);
}

#[tokio::test]
async fn test_failed_order_keeps_constructor() {
    let api = Arc::new(StubApi::default());
    *api.order_result.lock().unwrap() = Err(ApiError::opaque().with_status(500));
    let shop = storefront(api.clone());
    shop.login("test@example.com", "password", None).await.unwrap();
    shop.store().add_ingredient(ingredient(BUN));
    shop.store().add_ingredient(ingredient(SAUCE));

    let outcome = shop.place_order().await;
    assert!(matches!(outcome, PlaceOrderOutcome::Failed(OrderError::Api(_))));

    let state = shop.state();
    assert_eq!(
        state.submission_status(),
        SubmissionStatus::Failed {
            message: messages::ORDER_FAILED.to_string()
        }
    );
    assert!(state.order.order.is_none());
    assert_eq!(state.constructor.fillings.len(), 1);
    assert!(state.constructor.bun.is_some());
}

#[tokio::test]
async fn test_server_message_is_kept() {
    let api = Arc::new(StubApi::default());
    *api.order_result.lock().unwrap() = Err(ApiError::new("Ingredient ids must be provided"));
    let shop = storefront(api.clone());

    let result = shop.create_order(vec![IngredientId::from(BUN)]).await;
    assert!(result.is_err());
    assert_eq!(
        shop.state().order.error.as_deref(),
        Some("Ingredient ids must be provided")
    );
}

#[tokio::test]
async fn test_clear_order_error_resets_modal() {
    let api = Arc::new(StubApi::default());
    *api.order_result.lock().unwrap() = Err(ApiError::new("Test error"));
    let shop = storefront(api);

    let _ = shop.create_order(vec![IngredientId::from(BUN)]).await;
    assert!(shop.state().order.error.is_some());

    shop.store().clear_order_error();
    let order = shop.state().order;
    assert!(order.error.is_none());
    assert!(order.order.is_none());
    assert!(!order.is_submitting);
}

#[tokio::test]
async fn test_result_lands_after_modal_dismissed() {
    let (api, gate) = StubApi::gated();
    let shop = storefront(Arc::new(api));

    let mut rx = shop.store().subscribe();
    let pending = tokio::spawn({
        let shop = shop.clone();
        async move { shop.create_order(vec![IngredientId::from(BUN)]).await }
    });
    rx.wait_for(|s| s.order.is_submitting).await.unwrap();

    shop.store().clear_order_error();
    assert!(!shop.state().order.is_submitting);

    gate.notify_one();
    pending.await.unwrap().unwrap();
    assert_eq!(
        shop.state().submission_status(),
        SubmissionStatus::Succeeded { number: 85340 }
    );
}

#[tokio::test]
async fn test_result_after_reset_is_discarded() {
    let (api, gate) = StubApi::gated();
    let shop = storefront(Arc::new(api));

    let mut rx = shop.store().subscribe();
    let pending = tokio::spawn({
        let shop = shop.clone();
        async move { shop.create_order(vec![IngredientId::from(BUN)]).await }
    });
    rx.wait_for(|s| s.order.is_submitting).await.unwrap();

    shop.store().reset_order();
    gate.notify_one();

    let order = pending.await.unwrap().unwrap();
    assert_eq!(order.number, 85340);
    assert_eq!(shop.state().submission_status(), SubmissionStatus::Idle);
}

#[tokio::test]
async fn test_constructor_stays_responsive_during_submission() {
    let (api, gate) = StubApi::gated();
    let api = Arc::new(api);
    let shop = storefront(api.clone());
    shop.login("test@example.com", "password", None).await.unwrap();
    shop.store().add_ingredient(ingredient(BUN));

    let mut rx = shop.store().subscribe();
    let pending = tokio::spawn({
        let shop = shop.clone();
        async move { shop.place_order().await }
    });
    rx.wait_for(|s| s.order.is_submitting).await.unwrap();

    shop.store().add_ingredient(ingredient(SAUCE));
    assert_eq!(shop.state().constructor.fillings.len(), 1);
    let before = shop.state();
    assert!(!shop.store().move_ingredient(0, 3));
    assert!(shop.state().ptr_eq(&before));

    gate.notify_one();
    assert!(matches!(pending.await.unwrap(), PlaceOrderOutcome::Submitted(_)));
    assert_eq!(api.last_submitted().unwrap(), vec![BUN.to_string(), BUN.to_string()]);
}

#[tokio::test]
async fn test_order_details_prefer_loaded_lists() {
    let api = Arc::new(StubApi::default());
    api.feed.lock().unwrap().orders = vec![Order::new(666).with_ingredients(vec![
        IngredientId::from(BUN),
        IngredientId::from(PATTY),
        IngredientId::from(BUN),
    ])];
    let shop = storefront(api.clone());
    shop.load_ingredients().await.unwrap();
    shop.load_feed().await.unwrap();

    let order = shop.load_order_details(666).await.unwrap();
    assert_eq!(order.number, 666);
    assert_eq!(api.lookup_calls(), 0);

    let details = shop.state().order_details().unwrap();
    assert_eq!(details.lines.len(), 2);
    assert_eq!(details.lines[0].count, 2);
    assert_eq!(details.total, Decimal::from(90));
}

#[tokio::test]
async fn test_order_details_fall_back_to_lookup() {
    let api = Arc::new(StubApi::default());
    *api.lookup_result.lock().unwrap() = Ok(Some(Order::new(777)));
    let shop = storefront(api.clone());

    assert_eq!(shop.load_order_details(777).await.map(|o| o.number), Some(777));
    assert_eq!(api.lookup_calls(), 1);

    *api.lookup_result.lock().unwrap() = Err(ApiError::opaque().with_status(500));
    assert!(shop.load_order_details(778).await.is_none());
    assert!(shop.state().order.order.is_none());
    assert!(shop.state().order.error.is_none());
}
