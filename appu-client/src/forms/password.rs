// appu-client/src/forms/password.rs
// Credential rotation for the signed-in developer

use crate::api::PanelApi;
use crate::guard::Route;
use crate::http::HttpClient;
use crate::session::Session;
use crate::{ClientError, ClientResult};
use shared::validation::validate_password_change;

/// Shown when the backend gives no reason
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to change password";

#[derive(Debug, Clone, Default)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    loading: bool,
}

impl PasswordChangeForm {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate locally, then rotate the password.
    ///
    /// Success signs the operator out: the session is wiped and the caller
    /// lands on [`Route::Login`]. A failure keeps the session and carries
    /// the backend's reason when it gave one.
    pub async fn submit<C: HttpClient>(
        &mut self,
        api: &PanelApi<C>,
        session: Session,
    ) -> ClientResult<Route> {
        validate_password_change(&self.new_password, &self.confirm_password)?;

        self.loading = true;
        let result = api
            .change_password(&self.current_password, &self.new_password)
            .await;
        self.loading = false;

        match result {
            Ok(_) => {
                tracing::info!(username = ?session.username(), "Password changed, signing out");
                session.clear()?;
                Ok(Route::Login)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Password change failed");
                Err(failure_reason(e))
            }
        }
    }
}

/// Keep the backend's message, otherwise the generic one. Auth failures pass
/// through so the caller can send the operator back to login.
fn failure_reason(err: ClientError) -> ClientError {
    let (status, message) = match err {
        ClientError::Unauthorized => return ClientError::Unauthorized,
        ClientError::Api { status, message } => (status, message),
        ClientError::Forbidden(message) => (403, message),
        ClientError::NotFound(message) => (404, message),
        _ => (0, String::new()),
    };
    let message = if message.trim().is_empty() {
        DEFAULT_FAILURE_MESSAGE.to_string()
    } else {
        message
    };
    ClientError::Api { status, message }
}
