//! Auth and upload DTOs exchanged with the panel backend
//!
//! Request bodies are JSON; key casing follows what the backend expects,
//! which is not uniform across endpoints.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// `POST /api/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response. The token is optional on the wire so a success status with
/// no token can be told apart from a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `POST /api/logout`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub username: String,
}

/// `POST /api/change-password`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Stored alongside the token so logout knows whom to sign out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub username: String,
}

// =============================================================================
// Generic bodies
// =============================================================================

/// Loose `{message, error}` body used by most mutations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /api/upload-image` and `PUT /api/update_client` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    #[serde(rename = "imageFileName", default)]
    pub image_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `POST /api/add_client` response. The backend may echo the new id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMutationResponse {
    #[serde(default, deserialize_with = "crate::util::lenient_text")]
    pub client_id: String,
    #[serde(rename = "imageFileName", default)]
    pub image_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
