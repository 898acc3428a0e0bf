//! Read-only order lists: the public feed and the signed-in user's history

use crate::ids::RequestId;
use burger_types::{Order, OrdersPage};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedState {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_today: u64,
    pub is_loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub request: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedCommand {
    FetchPending { request: RequestId },
    FetchFulfilled { request: RequestId, page: OrdersPage },
    FetchRejected { request: RequestId, message: String },
}

impl FeedCommand {
    pub fn label(&self) -> &'static str {
        match self {
            FeedCommand::FetchPending { .. } => "feed/fetch/pending",
            FeedCommand::FetchFulfilled { .. } => "feed/fetch/fulfilled",
            FeedCommand::FetchRejected { .. } => "feed/fetch/rejected",
        }
    }
}

impl FeedState {
    pub fn apply(&self, command: FeedCommand) -> Self {
        match command {
            FeedCommand::FetchPending { request } => Self {
                is_loading: true,
                error: None,
                request: Some(request),
                ..self.clone()
            },
            FeedCommand::FetchFulfilled { request, page } => {
                if self.request != Some(request) {
                    return self.clone();
                }
                Self {
                    orders: page.orders,
                    total: page.total,
                    total_today: page.total_today,
                    is_loading: false,
                    error: None,
                    request: None,
                }
            }
            FeedCommand::FetchRejected { request, message } => {
                if self.request != Some(request) {
                    return self.clone();
                }
                Self {
                    is_loading: false,
                    error: Some(message),
                    request: None,
                    ..self.clone()
                }
            }
        }
    }

    pub fn find(&self, number: u64) -> Option<&Order> {
        self.orders.iter().find(|order| order.number == number)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProfileOrdersState {
    pub orders: Vec<Order>,
    pub is_loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub request: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOrdersCommand {
    FetchPending { request: RequestId },
    FetchFulfilled { request: RequestId, orders: Vec<Order> },
    FetchRejected { request: RequestId, message: String },
}

impl ProfileOrdersCommand {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileOrdersCommand::FetchPending { .. } => "profile-orders/fetch/pending",
            ProfileOrdersCommand::FetchFulfilled { .. } => "profile-orders/fetch/fulfilled",
            ProfileOrdersCommand::FetchRejected { .. } => "profile-orders/fetch/rejected",
        }
    }
}

impl ProfileOrdersState {
    pub fn apply(&self, command: ProfileOrdersCommand) -> Self {
        match command {
            ProfileOrdersCommand::FetchPending { request } => Self {
                orders: self.orders.clone(),
                is_loading: true,
                error: None,
                request: Some(request),
            },
            ProfileOrdersCommand::FetchFulfilled { request, orders } => {
                if self.request != Some(request) {
                    return self.clone();
                }
                Self {
                    orders,
                    is_loading: false,
                    error: None,
                    request: None,
                }
            }
            ProfileOrdersCommand::FetchRejected { request, message } => {
                if self.request != Some(request) {
                    return self.clone();
                }
                Self {
                    orders: self.orders.clone(),
                    is_loading: false,
                    error: Some(message),
                    request: None,
                }
            }
        }
    }

    pub fn find(&self, number: u64) -> Option<&Order> {
        self.orders.iter().find(|order| order.number == number)
    }
}
