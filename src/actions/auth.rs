use super::Storefront;
use crate::api::{self, UserUpdate};
use crate::error::{messages, ApiError};
use crate::navigation::Redirect;
use crate::state::{AuthCommand, AuthOperation};
use burger_types::User;
use std::future::Future;
use tracing::{info, warn};

impl Storefront {
    /// Resolve the stored session. Sets the auth-checked latch whether or
    /// not a user comes back.
    pub async fn check_auth(&self) -> Result<User, ApiError> {
        self.run_user_operation(
            AuthOperation::Check,
            messages::UNKNOWN,
            self.api.current_user(),
        )
        .await
    }

    /// Log in and return where to go next: `from` when the login was
    /// triggered by a redirect, the profile page otherwise.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        from: Option<&str>,
    ) -> Result<Redirect, ApiError> {
        self.run_user_operation(
            AuthOperation::Login,
            messages::LOGIN_FAILED,
            self.api.login(email, password),
        )
        .await?;

        let target = from
            .filter(|f| !f.is_empty())
            .unwrap_or(self.routes.after_login.as_str());
        Ok(Redirect::to(target))
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        self.run_user_operation(
            AuthOperation::Register,
            messages::REGISTRATION_FAILED,
            self.api.register(name, email, password),
        )
        .await
    }

    pub async fn update_user(&self, update: UserUpdate) -> Result<User, ApiError> {
        self.run_user_operation(
            AuthOperation::Update,
            messages::UPDATE_FAILED,
            self.api.update_user(&update),
        )
        .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = self.store.next_request_id();
        self.store.dispatch(AuthCommand::Pending {
            request,
            operation: AuthOperation::Logout,
        });

        match self.api.logout().await {
            Ok(()) => {
                info!("logged out");
                self.store.dispatch(AuthCommand::LoggedOut { request });
                Ok(())
            }
            Err(error) => {
                let message = error.message_or(messages::UNKNOWN);
                warn!(%request, error = %message, "logout failed");
                self.store.dispatch(AuthCommand::Rejected {
                    request,
                    operation: AuthOperation::Logout,
                    message,
                });
                Err(error)
            }
        }
    }

    /// Shared lifecycle of every operation that resolves to the current user
    async fn run_user_operation<F>(
        &self,
        operation: AuthOperation,
        fallback: &str,
        call: F,
    ) -> Result<User, ApiError>
    where
        F: Future<Output = api::Result<User>>,
    {
        let request = self.store.next_request_id();
        self.store.dispatch(AuthCommand::Pending { request, operation });

        match call.await {
            Ok(user) => {
                info!(operation = operation.as_str(), email = %user.email, "user resolved");
                self.store.dispatch(AuthCommand::UserReceived {
                    request,
                    operation,
                    user: user.clone(),
                });
                Ok(user)
            }
            Err(error) => {
                let message = error.message_or(fallback);
                warn!(
                    operation = operation.as_str(),
                    %request,
                    error = %message,
                    "auth operation failed"
                );
                self.store.dispatch(AuthCommand::Rejected {
                    request,
                    operation,
                    message,
                });
                Err(error)
            }
        }
    }
}
