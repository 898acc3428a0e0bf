//! Route access decisions
//!
//! The core never drives a router. It answers "may this route render now?"
//! and hands back [`Redirect`] values for the UI layer to follow.

use crate::config::RouteConfig;
use crate::state::AuthState;
use serde::Serialize;

/// A navigation request: go to `to`, remembering where we came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl Redirect {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            to: path.into(),
            from: None,
        }
    }

    pub fn with_origin(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteAccess {
    #[default]
    Public,
    /// Profile, order history
    AuthenticatedOnly,
    /// Login, register, password reset
    UnauthenticatedOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    /// Auth not settled yet; show a preloader
    Pending,
    Redirect(Redirect),
}

/// Decide what a route at `location` should do under the current auth state.
///
/// `origin` is the location recorded by an earlier redirect to this route.
pub fn guard_route(
    auth: &AuthState,
    access: RouteAccess,
    location: &str,
    origin: Option<&str>,
    routes: &RouteConfig,
) -> RouteDecision {
    if access == RouteAccess::Public {
        return RouteDecision::Render;
    }
    if auth.is_loading || !auth.is_auth_checked {
        return RouteDecision::Pending;
    }

    match (access, auth.user.is_some()) {
        (RouteAccess::AuthenticatedOnly, false) => {
            RouteDecision::Redirect(Redirect::to(&routes.login).with_origin(location))
        }
        (RouteAccess::UnauthenticatedOnly, true) => {
            let target = origin.filter(|o| !o.is_empty()).unwrap_or(routes.constructor.as_str());
            RouteDecision::Redirect(Redirect::to(target))
        }
        _ => RouteDecision::Render,
    }
}
