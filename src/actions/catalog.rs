use super::Storefront;
use crate::error::{messages, ApiError};
use crate::state::IngredientsCommand;
use burger_types::Ingredient;
use tracing::{info, warn};

impl Storefront {
    pub async fn load_ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        let request = self.store.next_request_id();
        self.store.dispatch(IngredientsCommand::FetchPending { request });

        match self.api.fetch_ingredients().await {
            Ok(items) => {
                info!(count = items.len(), "ingredients loaded");
                self.store.dispatch(IngredientsCommand::FetchFulfilled {
                    request,
                    items: items.clone(),
                });
                Ok(items)
            }
            Err(error) => {
                let message = error.message_or(messages::INGREDIENTS_FAILED);
                warn!(%request, error = %message, "ingredient fetch failed");
                self.store.dispatch(IngredientsCommand::FetchRejected { request, message });
                Err(error)
            }
        }
    }
}
