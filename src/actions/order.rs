use super::Storefront;
use crate::error::{messages, OrderError};
use crate::ids::RequestId;
use crate::navigation::Redirect;
use crate::state::OrderCommand;
use burger_types::{IngredientId, Order};
use tracing::{info, warn};

/// Result of pressing "place order"
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderOutcome {
    Submitted(Order),
    /// Refused locally (no bun); nothing was sent
    Refused(OrderError),
    /// Another submission is already in flight
    Ignored,
    /// Nobody is signed in; log in first, then come back
    Redirect(Redirect),
    /// The server rejected the order; the constructor is left intact
    Failed(OrderError),
}

impl Storefront {
    /// Submit an ingredient-id sequence as a new order.
    ///
    /// An empty sequence fails validation without a network call.
    pub async fn create_order(&self, ingredients: Vec<IngredientId>) -> Result<Order, OrderError> {
        if ingredients.is_empty() {
            warn!("order rejected: no ingredients");
            self.store.dispatch(OrderCommand::ValidationFailed {
                message: messages::EMPTY_ORDER.to_string(),
            });
            return Err(OrderError::EmptyIngredients);
        }

        let request = self.store.next_request_id();
        self.store.dispatch(OrderCommand::SubmitPending { request });
        self.submit(request, ingredients).await
    }

    /// Submit whatever the constructor holds, if the user is allowed to.
    ///
    /// At most one submission is in flight at a time: the in-flight check
    /// and the switch to submitting happen in one store operation. A
    /// dismissed submission still counts as in flight until its result
    /// arrives. On success the constructor is cleared.
    pub async fn place_order(&self) -> PlaceOrderOutcome {
        let snapshot = self.store.state();
        if snapshot.constructor.bun.is_none() {
            if !snapshot.order.is_in_flight() {
                warn!("order rejected: no bun");
                self.store.dispatch(OrderCommand::ValidationFailed {
                    message: messages::MISSING_BUN.to_string(),
                });
            }
            return PlaceOrderOutcome::Refused(OrderError::MissingBun);
        }
        if snapshot.order.is_in_flight() {
            return PlaceOrderOutcome::Ignored;
        }
        if snapshot.auth.user.is_none() {
            return PlaceOrderOutcome::Redirect(
                Redirect::to(&self.routes.login).with_origin(&self.routes.constructor),
            );
        }

        let request = self.store.next_request_id();
        let mut ingredients = None;
        let admitted = self.store.dispatch_if(
            |state| {
                if state.order.is_in_flight() || state.auth.user.is_none() {
                    return false;
                }
                ingredients = state.constructor.order_ingredient_ids();
                ingredients.is_some()
            },
            OrderCommand::SubmitPending { request },
        );
        let ingredients = match ingredients {
            Some(ids) if admitted => ids,
            _ => return PlaceOrderOutcome::Ignored,
        };

        match self.submit(request, ingredients).await {
            Ok(order) => {
                self.store.clear_constructor();
                PlaceOrderOutcome::Submitted(order)
            }
            Err(error) => PlaceOrderOutcome::Failed(error),
        }
    }

    async fn submit(
        &self,
        request: RequestId,
        ingredients: Vec<IngredientId>,
    ) -> Result<Order, OrderError> {
        match self.api.submit_order(&ingredients).await {
            Ok(mut order) => {
                if order.ingredients.is_empty() {
                    order.ingredients = ingredients;
                }
                info!(%request, number = order.number, "order placed");
                self.store.dispatch(OrderCommand::SubmitFulfilled {
                    request,
                    order: order.clone(),
                });
                Ok(order)
            }
            Err(error) => {
                let message = error.message_or(messages::ORDER_FAILED);
                warn!(%request, error = %message, "order submission failed");
                self.store.dispatch(OrderCommand::SubmitRejected { request, message });
                Err(OrderError::Api(error))
            }
        }
    }

    /// Show an order by number: taken from the feed or the user's history
    /// when already loaded, fetched otherwise. A miss or a failed lookup
    /// leaves the order slice empty.
    pub async fn load_order_details(&self, number: u64) -> Option<Order> {
        let snapshot = self.store.state();
        let known = snapshot
            .feed
            .find(number)
            .or_else(|| snapshot.profile_orders.find(number))
            .cloned();

        let order = match known {
            Some(order) => Some(order),
            None => match self.api.lookup_order_by_number(number).await {
                Ok(order) => order,
                Err(error) => {
                    warn!(number, error = %error, "order lookup failed");
                    None
                }
            },
        };

        self.store.set_order_data(order.clone());
        order
    }
}
