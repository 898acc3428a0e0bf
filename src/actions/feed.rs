use super::Storefront;
use crate::error::{messages, ApiError};
use crate::state::{FeedCommand, ProfileOrdersCommand};
use burger_types::{Order, OrdersPage};
use tracing::{debug, warn};

impl Storefront {
    /// Public feed of recent orders with the all-time and today counters
    pub async fn load_feed(&self) -> Result<OrdersPage, ApiError> {
        let request = self.store.next_request_id();
        self.store.dispatch(FeedCommand::FetchPending { request });

        match self.api.fetch_feed().await {
            Ok(page) => {
                debug!(orders = page.orders.len(), total = page.total, "feed loaded");
                self.store.dispatch(FeedCommand::FetchFulfilled {
                    request,
                    page: page.clone(),
                });
                Ok(page)
            }
            Err(error) => {
                let message = error.message_or(messages::FEED_FAILED);
                warn!(%request, error = %message, "feed fetch failed");
                self.store.dispatch(FeedCommand::FetchRejected { request, message });
                Err(error)
            }
        }
    }

    /// Order history of the signed-in user
    pub async fn load_profile_orders(&self) -> Result<Vec<Order>, ApiError> {
        let request = self.store.next_request_id();
        self.store.dispatch(ProfileOrdersCommand::FetchPending { request });

        match self.api.fetch_user_orders().await {
            Ok(page) => {
                debug!(orders = page.orders.len(), "order history loaded");
                self.store.dispatch(ProfileOrdersCommand::FetchFulfilled {
                    request,
                    orders: page.orders.clone(),
                });
                Ok(page.orders)
            }
            Err(error) => {
                let message = error.message_or(messages::ORDERS_FAILED);
                warn!(%request, error = %message, "order history fetch failed");
                self.store.dispatch(ProfileOrdersCommand::FetchRejected { request, message });
                Err(error)
            }
        }
    }
}
