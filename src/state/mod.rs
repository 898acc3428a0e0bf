//! Storefront state tree
//!
//! Each slice is a plain value with a pure `apply(&self, command) -> Self`.
//! [`RootState`] holds the slices behind `Arc`s and swaps only the one a
//! command addresses. A command that leaves its slice equal keeps the old
//! `Arc`, so subscribers can use pointer equality to skip unchanged slices.

pub mod auth;
pub mod constructor;
pub mod feed;
pub mod ingredients;
pub mod order;

pub use auth::{AuthCommand, AuthOperation, AuthState};
pub use constructor::{ConstructorCommand, ConstructorState, ConstructorStatus};
pub use feed::{FeedCommand, FeedState, ProfileOrdersCommand, ProfileOrdersState};
pub use ingredients::{IngredientsCommand, IngredientsState};
pub use order::{OrderCommand, OrderState};

use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: Arc<AuthState>,
    pub constructor: Arc<ConstructorState>,
    pub order: Arc<OrderState>,
    pub ingredients: Arc<IngredientsState>,
    pub feed: Arc<FeedState>,
    pub profile_orders: Arc<ProfileOrdersState>,
}

/// A command addressed to exactly one slice
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Auth(AuthCommand),
    Constructor(ConstructorCommand),
    Order(OrderCommand),
    Ingredients(IngredientsCommand),
    Feed(FeedCommand),
    ProfileOrders(ProfileOrdersCommand),
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Auth(c) => c.label(),
            Command::Constructor(c) => c.label(),
            Command::Order(c) => c.label(),
            Command::Ingredients(c) => c.label(),
            Command::Feed(c) => c.label(),
            Command::ProfileOrders(c) => c.label(),
        }
    }
}

macro_rules! impl_from_command {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Command {
                fn from(command: $ty) -> Self {
                    Command::$variant(command)
                }
            }
        )*
    };
}

impl_from_command! {
    Auth => AuthCommand,
    Constructor => ConstructorCommand,
    Order => OrderCommand,
    Ingredients => IngredientsCommand,
    Feed => FeedCommand,
    ProfileOrders => ProfileOrdersCommand,
}

/// Apply `f` to a slice, keeping the original `Arc` when nothing changed
fn step<T, F>(slice: &Arc<T>, f: F) -> Arc<T>
where
    T: PartialEq,
    F: FnOnce(&T) -> T,
{
    let next = f(slice.as_ref());
    if next == **slice {
        Arc::clone(slice)
    } else {
        Arc::new(next)
    }
}

impl RootState {
    pub fn apply(&self, command: Command) -> Self {
        let mut next = self.clone();
        match command {
            Command::Auth(c) => next.auth = step(&self.auth, |s| s.apply(c)),
            Command::Constructor(c) => next.constructor = step(&self.constructor, |s| s.apply(c)),
            Command::Order(c) => next.order = step(&self.order, |s| s.apply(c)),
            Command::Ingredients(c) => next.ingredients = step(&self.ingredients, |s| s.apply(c)),
            Command::Feed(c) => next.feed = step(&self.feed, |s| s.apply(c)),
            Command::ProfileOrders(c) => {
                next.profile_orders = step(&self.profile_orders, |s| s.apply(c))
            }
        }
        next
    }

    /// True when every slice is the same allocation as in `other`
    pub fn ptr_eq(&self, other: &RootState) -> bool {
        Arc::ptr_eq(&self.auth, &other.auth)
            && Arc::ptr_eq(&self.constructor, &other.constructor)
            && Arc::ptr_eq(&self.order, &other.order)
            && Arc::ptr_eq(&self.ingredients, &other.ingredients)
            && Arc::ptr_eq(&self.feed, &other.feed)
            && Arc::ptr_eq(&self.profile_orders, &other.profile_orders)
    }
}
