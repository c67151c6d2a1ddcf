//! Panel forms
//!
//! Each form owns one draft. `submit` takes `&mut self`, so a draft can only
//! have one request in flight; `is_loading` mirrors that for display.

pub mod app_update;
pub mod client_form;
pub mod login;
pub mod password;

pub use app_update::AppUpdateForm;
pub use client_form::{ClientForm, FormMode};
pub use login::{LoginForm, logout};
pub use password::PasswordChangeForm;

use crate::ClientError;
use crate::session::Session;

/// Wipe the local session when the backend rejected its token.
///
/// Returns the error unchanged so callers can `map_err` through it.
pub fn expire_on_unauthorized(session: &Session, err: ClientError) -> ClientError {
    if matches!(err, ClientError::Unauthorized) {
        tracing::info!("Token rejected by backend, clearing session");
        if let Err(e) = session.store().clear() {
            tracing::warn!(error = %e, "Failed to clear session");
        }
    }
    err
}
