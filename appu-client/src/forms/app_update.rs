// appu-client/src/forms/app_update.rs
// Per-client app update flag and download link

use crate::ClientResult;
use crate::api::PanelApi;
use crate::http::HttpClient;
use shared::validation::validate_app_update;
use shared::{AppUpdateChoice, AppUpdateSetting};

/// App-update settings draft for one client
#[derive(Debug, Clone)]
pub struct AppUpdateForm {
    client_id: String,
    setting: AppUpdateSetting,
    loading: bool,
}

impl AppUpdateForm {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            setting: AppUpdateSetting::default(),
            loading: false,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn setting(&self) -> &AppUpdateSetting {
        &self.setting
    }

    pub fn choice(&self) -> AppUpdateChoice {
        self.setting.app_update
    }

    pub fn download_link(&self) -> &str {
        &self.setting.download_link
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The link input is shown, and required, only for "Yes"
    pub fn link_visible(&self) -> bool {
        self.setting.app_update == AppUpdateChoice::Yes
    }

    pub fn link_required(&self) -> bool {
        self.link_visible()
    }

    /// Fetch the stored setting. On failure both fields are reset.
    pub async fn load<C: HttpClient>(&mut self, api: &PanelApi<C>) -> ClientResult<()> {
        self.loading = true;
        let result = api.get_app_update(&self.client_id).await;
        self.loading = false;
        match result {
            Ok(setting) => {
                self.setting = setting;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(client_id = %self.client_id, error = %e, "Failed to load app update setting");
                self.setting = AppUpdateSetting::default();
                Err(e)
            }
        }
    }

    /// Choosing "No" clears the link.
    pub fn select(&mut self, choice: AppUpdateChoice) {
        self.setting.app_update = choice;
        if choice == AppUpdateChoice::No {
            self.setting.download_link.clear();
        }
    }

    pub fn set_download_link(&mut self, link: impl Into<String>) {
        self.setting.download_link = link.into();
    }

    /// Validate and upsert; the form then adopts whatever the server echoed.
    pub async fn submit<C: HttpClient>(&mut self, api: &PanelApi<C>) -> ClientResult<()> {
        let req = validate_app_update(
            &self.client_id,
            self.setting.app_update,
            &self.setting.download_link,
        )?;

        self.loading = true;
        let result = api.upsert_app_update(&req).await;
        self.loading = false;
        let resp = result.inspect_err(|e| {
            tracing::warn!(client_id = %self.client_id, error = %e, "Failed to save app update setting");
        })?;

        self.setting = AppUpdateSetting {
            app_update: resp.app_update.unwrap_or(req.app_update),
            download_link: resp.download_link.unwrap_or(req.download_link),
        };
        tracing::info!(
            client_id = %self.client_id,
            app_update = %self.setting.app_update,
            "App update setting saved"
        );
        Ok(())
    }
}
