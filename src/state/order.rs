//! Order submission slice
//!
//! ```text
//! idle ──SubmitPending──▶ submitting ──Fulfilled──▶ order shown
//!                                    └─Rejected───▶ error shown
//! ```
//!
//! `ClearError` (modal dismissed) and `Reset` (navigated away) both leave no
//! order behind. They differ in what happens to a request still in flight:
//! `ClearError` keeps tracking it so its result still lands, `Reset` forgets it.

use crate::ids::RequestId;
use burger_types::Order;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderState {
    pub order: Option<Order>,
    pub is_submitting: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub request: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    SubmitPending { request: RequestId },
    SubmitFulfilled { request: RequestId, order: Order },
    SubmitRejected { request: RequestId, message: String },
    /// Submission refused before reaching the network
    ValidationFailed { message: String },
    /// Out-of-band order data for detail views
    SetOrderData(Option<Order>),
    ClearError,
    Reset,
}

impl OrderCommand {
    pub fn label(&self) -> &'static str {
        match self {
            OrderCommand::SubmitPending { .. } => "order/submit/pending",
            OrderCommand::SubmitFulfilled { .. } => "order/submit/fulfilled",
            OrderCommand::SubmitRejected { .. } => "order/submit/rejected",
            OrderCommand::ValidationFailed { .. } => "order/submit/invalid",
            OrderCommand::SetOrderData(_) => "order/set-data",
            OrderCommand::ClearError => "order/clear-error",
            OrderCommand::Reset => "order/reset",
        }
    }
}

impl OrderState {
    pub fn apply(&self, command: OrderCommand) -> Self {
        match command {
            OrderCommand::SubmitPending { request } => Self {
                order: self.order.clone(),
                is_submitting: true,
                error: None,
                request: Some(request),
            },
            OrderCommand::SubmitFulfilled { request, order } => {
                if !self.is_current(request) {
                    return self.clone();
                }
                Self {
                    order: Some(order),
                    is_submitting: false,
                    error: None,
                    request: None,
                }
            }
            OrderCommand::SubmitRejected { request, message } => {
                if !self.is_current(request) {
                    return self.clone();
                }
                Self {
                    order: None,
                    is_submitting: false,
                    error: Some(message),
                    request: None,
                }
            }
            OrderCommand::ValidationFailed { message } => Self {
                order: None,
                is_submitting: false,
                error: Some(message),
                request: self.request,
            },
            OrderCommand::SetOrderData(order) => Self {
                order,
                is_submitting: self.is_submitting,
                error: None,
                request: self.request,
            },
            OrderCommand::ClearError => Self {
                order: None,
                is_submitting: false,
                error: None,
                request: self.request,
            },
            OrderCommand::Reset => Self::default(),
        }
    }

    pub fn is_current(&self, request: RequestId) -> bool {
        self.request == Some(request)
    }

    /// A submission is awaiting its result, even if its modal was dismissed
    pub fn is_in_flight(&self) -> bool {
        self.is_submitting || self.request.is_some()
    }
}
