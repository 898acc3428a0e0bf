//! Auth slice: current user and the one-way "auth checked" latch

use crate::ids::RequestId;
use burger_types::User;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    /// Set once the first session check has resolved either way
    pub is_auth_checked: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub request: Option<RequestId>,
}

/// Which credential operation a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOperation {
    Check,
    Login,
    Register,
    Logout,
    Update,
}

impl AuthOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthOperation::Check => "check",
            AuthOperation::Login => "login",
            AuthOperation::Register => "register",
            AuthOperation::Logout => "logout",
            AuthOperation::Update => "update",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthCommand {
    Pending {
        request: RequestId,
        operation: AuthOperation,
    },
    /// Check, login, register and update all resolve to the current user
    UserReceived {
        request: RequestId,
        operation: AuthOperation,
        user: User,
    },
    LoggedOut {
        request: RequestId,
    },
    Rejected {
        request: RequestId,
        operation: AuthOperation,
        message: String,
    },
    MarkAuthChecked,
    Reset,
}

impl AuthCommand {
    pub fn label(&self) -> &'static str {
        match self {
            AuthCommand::Pending { .. } => "auth/pending",
            AuthCommand::UserReceived { .. } => "auth/user-received",
            AuthCommand::LoggedOut { .. } => "auth/logged-out",
            AuthCommand::Rejected { .. } => "auth/rejected",
            AuthCommand::MarkAuthChecked => "auth/mark-checked",
            AuthCommand::Reset => "auth/reset",
        }
    }
}

impl AuthState {
    pub fn apply(&self, command: AuthCommand) -> Self {
        match command {
            AuthCommand::Pending { request, .. } => Self {
                user: self.user.clone(),
                is_auth_checked: self.is_auth_checked,
                is_loading: true,
                error: None,
                request: Some(request),
            },
            AuthCommand::UserReceived {
                request,
                operation,
                user,
            } => {
                if !self.is_current(request) {
                    return self.superseded(operation);
                }
                Self {
                    user: Some(user),
                    is_auth_checked: self.is_auth_checked || operation == AuthOperation::Check,
                    is_loading: false,
                    error: None,
                    request: None,
                }
            }
            AuthCommand::LoggedOut { request } => {
                if !self.is_current(request) {
                    return self.clone();
                }
                Self {
                    user: None,
                    is_auth_checked: self.is_auth_checked,
                    is_loading: false,
                    error: None,
                    request: None,
                }
            }
            AuthCommand::Rejected {
                request,
                operation,
                message,
            } => {
                if !self.is_current(request) {
                    return self.superseded(operation);
                }
                Self {
                    user: self.user.clone(),
                    is_auth_checked: self.is_auth_checked || operation == AuthOperation::Check,
                    is_loading: false,
                    error: Some(message),
                    request: None,
                }
            }
            AuthCommand::MarkAuthChecked => {
                if self.is_auth_checked {
                    return self.clone();
                }
                Self {
                    is_auth_checked: true,
                    ..self.clone()
                }
            }
            AuthCommand::Reset => Self::default(),
        }
    }

    pub fn is_current(&self, request: RequestId) -> bool {
        self.request == Some(request)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// A stale check result carries no data we trust, but the session
    /// has still been checked once.
    fn superseded(&self, operation: AuthOperation) -> Self {
        if operation == AuthOperation::Check && !self.is_auth_checked {
            return Self {
                is_auth_checked: true,
                ..self.clone()
            };
        }
        self.clone()
    }
}
