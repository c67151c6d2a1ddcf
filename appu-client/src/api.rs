//! Typed panel backend endpoints
//!
//! Thin wrappers over [`HttpClient`]; no validation happens here.

use crate::http::{HttpClient, ImageFile, MultipartBody, NetworkHttpClient};
use crate::session::Session;
use crate::{ClientConfig, ClientError, ClientResult};
use shared::ClientRecord;
use shared::client::{
    ApiMessage, ChangePasswordRequest, ClientMutationResponse, ImageUploadResponse, LoginRequest,
    LoginResponse, LogoutRequest,
};
use shared::models::{AppUpdateRequest, AppUpdateResponse, AppUpdateSetting};

/// Panel backend API
#[derive(Debug, Clone)]
pub struct PanelApi<C: HttpClient = NetworkHttpClient> {
    http: C,
}

impl PanelApi<NetworkHttpClient> {
    /// Unauthenticated API over the network
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::from_config(config)?))
    }

    /// API carrying the session's bearer token
    pub fn for_session(config: &ClientConfig, session: &Session) -> ClientResult<Self> {
        let mut api = Self::from_config(config)?;
        api.set_token(Some(session.token().to_string()));
        Ok(api)
    }
}

impl<C: HttpClient> PanelApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }

    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    // ========== Auth API ==========

    /// Exchange credentials for a token
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.http.post("/api/login", &req).await
    }

    /// Invalidate the server-side session for `username`
    pub async fn logout(&self, username: &str) -> ClientResult<()> {
        let req = LogoutRequest {
            username: username.to_string(),
        };
        let _: Option<ApiMessage> = self.http.post("/api/logout", &req).await?;
        Ok(())
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ClientResult<Option<ApiMessage>> {
        let req = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.http.post("/api/change-password", &req).await
    }

    // ========== Clients API ==========

    pub async fn list_clients(&self) -> ClientResult<Vec<ClientRecord>> {
        let clients: Option<Vec<ClientRecord>> = self.http.get("/api/clients").await?;
        Ok(clients.unwrap_or_default())
    }

    /// Create a client; the image, if any, travels in the same request.
    pub async fn add_client(
        &self,
        record: &ClientRecord,
        image: Option<ImageFile>,
    ) -> ClientResult<ClientMutationResponse> {
        let mut body = record_body(record);
        if let Some(image) = image {
            body = body.file("image", image);
        }
        let resp: Option<ClientMutationResponse> =
            self.http.post_multipart("/api/add_client", body).await?;
        Ok(resp.unwrap_or_default())
    }

    /// Update a client. The image is referenced by its stored filename only.
    pub async fn update_client(&self, record: &ClientRecord) -> ClientResult<ClientMutationResponse> {
        let mut body = record_body(record).text("image", record.image.clone());
        if !record.image.is_empty() {
            body = body.text("existingImage", record.image.clone());
        }
        let resp: Option<ClientMutationResponse> =
            self.http.put_multipart("/api/update_client", body).await?;
        Ok(resp.unwrap_or_default())
    }

    /// Upload a client image, replacing `old_image`. Returns the new filename.
    pub async fn upload_image(
        &self,
        image: ImageFile,
        old_image: Option<&str>,
    ) -> ClientResult<String> {
        let mut body = MultipartBody::new().file("image", image);
        if let Some(old) = old_image.filter(|o| !o.is_empty()) {
            body = body.text("oldImage", old);
        }
        let resp: ImageUploadResponse = self.http.post_multipart("/api/upload-image", body).await?;
        resp.image_file_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("Missing imageFileName".into()))
    }

    /// Path of a stored image, relative to the base URL
    pub fn client_image_path(name: &str) -> String {
        format!("/api/client-image/{name}")
    }

    /// Absolute URL of a stored image
    pub fn client_image_url(&self, name: &str) -> String {
        format!("{}{}", self.http.base_url(), Self::client_image_path(name))
    }

    pub async fn client_image(&self, name: &str) -> ClientResult<Vec<u8>> {
        self.http.get_bytes(&Self::client_image_path(name)).await
    }

    // ========== App update API ==========

    pub async fn get_app_update(&self, client_id: &str) -> ClientResult<AppUpdateSetting> {
        let setting: Option<AppUpdateSetting> = self
            .http
            .get(&format!("/api/app_update/{client_id}"))
            .await?;
        Ok(setting.unwrap_or_default())
    }

    pub async fn upsert_app_update(&self, req: &AppUpdateRequest) -> ClientResult<AppUpdateResponse> {
        let resp: Option<AppUpdateResponse> = self.http.post("/api/app_update", req).await?;
        Ok(resp.unwrap_or_default())
    }
}

/// Text parts shared by create and update
fn record_body(record: &ClientRecord) -> MultipartBody {
    record
        .form_fields()
        .into_iter()
        .fold(MultipartBody::new(), |body, (name, value)| body.text(name, value))
}
