//! Shared types for the Order Appu developer panel
//!
//! Domain records, wire DTOs, validation rules and date formatting used by
//! both the HTTP client and the console.

pub mod client;
pub mod error;
pub mod models;
pub mod util;
pub mod validation;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use models::{AppUpdateChoice, AppUpdateSetting, ClientField, ClientRecord, StatusTone};
pub use serde::{Deserialize, Serialize};
