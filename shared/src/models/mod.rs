//! Data models
//!
//! Records owned by the panel backend. The panel reads and edits them but
//! never assigns identities or audit timestamps itself.

pub mod app_update;
pub mod client_record;

// Re-exports
pub use app_update::*;
pub use client_record::*;
