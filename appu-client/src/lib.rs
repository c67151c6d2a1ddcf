//! Appu Client - HTTP client for the Order Appu developer panel
//!
//! Typed calls to the panel backend, the persisted session and its route
//! guard, and the form and table state the panel works with.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod http;
pub mod session;
pub mod views;

#[cfg(test)]
mod testing;

pub use api::PanelApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use forms::{AppUpdateForm, ClientForm, FormMode, LoginForm, PasswordChangeForm};
pub use guard::{GuardDecision, Route, SessionGuard};
pub use http::{HttpClient, ImageFile, MultipartBody, NetworkHttpClient};
pub use session::{Session, SessionStore};
pub use views::{ClientDetail, ClientList, ClientRow, DatabaseOverview};

// Re-export shared types for convenience
pub use shared::{AppUpdateChoice, AppUpdateSetting, ClientField, ClientRecord, ValidationError};
