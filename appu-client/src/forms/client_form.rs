//! Client record form, shared by Add and Edit
//!
//! The draft is a [`ClientRecord`]. Issue and expiry dates are derived:
//! the issue date is fixed when the form opens, and the expiry date is
//! recomputed after every edit that could change it.

use crate::api::PanelApi;
use crate::http::{HttpClient, ImageFile};
use crate::ClientResult;
use shared::util;
use shared::validation::{accepts_numeric_input, validate_due_on};
use shared::{ClientField, ClientRecord, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

/// Draft for one client record
#[derive(Debug, Clone)]
pub struct ClientForm {
    mode: FormMode,
    draft: ClientRecord,
    /// Add mode only; sent with the create request
    pending_image: Option<ImageFile>,
    loading: bool,
    uploading: bool,
}

impl ClientForm {
    /// New record issued today
    pub fn add() -> Self {
        Self::add_on(&util::today())
    }

    /// New record issued on `issue_date` (`YYYY-MM-DD`)
    pub fn add_on(issue_date: &str) -> Self {
        let draft = ClientRecord {
            issue_date: issue_date.to_string(),
            ..Default::default()
        };
        Self::with_draft(FormMode::Add, draft)
    }

    /// Edit an existing record
    pub fn edit(record: ClientRecord) -> Self {
        Self::with_draft(FormMode::Edit, record)
    }

    fn with_draft(mode: FormMode, mut draft: ClientRecord) -> Self {
        draft.recompute_expiry();
        Self {
            mode,
            draft,
            pending_image: None,
            loading: false,
            uploading: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &ClientRecord {
        &self.draft
    }

    pub fn into_draft(self) -> ClientRecord {
        self.draft
    }

    pub fn pending_image(&self) -> Option<&ImageFile> {
        self.pending_image.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Apply one edit.
    ///
    /// Derived fields are read-only. Numeric fields refuse anything but
    /// digits and keep their previous value when refused.
    pub fn set_field(&mut self, field: ClientField, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        if field.is_derived() {
            return Err(ValidationError::ReadOnlyField(field.label()));
        }
        if field.is_numeric() && !accepts_numeric_input(&value) {
            return Err(ValidationError::NonNumericInput(field.label()));
        }
        *self.draft.field_mut(field) = value;
        if field == ClientField::Duration {
            self.draft.recompute_expiry();
        }
        Ok(())
    }

    /// Submission checks, first failure wins
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_due_on(&self.draft.default_due_on, &self.draft.max_due_on)?;
        if let Some(field) = self.draft.first_missing_required() {
            return Err(ValidationError::MissingField(field.label()));
        }
        Ok(())
    }

    /// Pick an image.
    ///
    /// In Add mode the file is held for the create request. In Edit mode it
    /// is uploaded at once, replacing the stored file; a failed upload keeps
    /// the previous filename and the form stays usable.
    pub async fn select_image<C: HttpClient>(
        &mut self,
        api: &PanelApi<C>,
        image: ImageFile,
    ) -> ClientResult<()> {
        match self.mode {
            FormMode::Add => {
                self.pending_image = Some(image);
                Ok(())
            }
            FormMode::Edit => {
                self.uploading = true;
                let old = (!self.draft.image.is_empty()).then_some(self.draft.image.as_str());
                let result = api.upload_image(image, old).await;
                self.uploading = false;
                match result {
                    Ok(name) => {
                        tracing::info!(client_id = %self.draft.client_id, image = %name, "Client image uploaded");
                        self.draft.image = name;
                        Ok(())
                    }
                    Err(e) => {
                        tracing::warn!(client_id = %self.draft.client_id, error = %e, "Failed to upload image");
                        Err(e)
                    }
                }
            }
        }
    }

    /// Validate and send the draft.
    ///
    /// Nothing is sent while invalid. On success the draft adopts what the
    /// server echoed back and the saved record is returned so the caller can
    /// refresh its list; on failure the draft is left as it was.
    pub async fn submit<C: HttpClient>(&mut self, api: &PanelApi<C>) -> ClientResult<ClientRecord> {
        self.validate()?;

        self.loading = true;
        let result = match self.mode {
            FormMode::Add => api.add_client(&self.draft, self.pending_image.clone()).await,
            FormMode::Edit => api.update_client(&self.draft).await,
        };
        self.loading = false;

        let resp = result.inspect_err(|e| {
            tracing::warn!(client_id = %self.draft.client_id, error = %e, "Failed to save client");
        })?;

        if let Some(name) = resp.image_file_name.filter(|n| !n.is_empty()) {
            self.draft.image = name;
        }
        if self.draft.client_id.is_empty() && !resp.client_id.is_empty() {
            self.draft.client_id = resp.client_id;
        }
        if self.mode == FormMode::Add {
            self.pending_image = None;
        }
        tracing::info!(client_id = %self.draft.client_id, mode = ?self.mode, "Client saved");
        Ok(self.draft.clone())
    }
}
