//! App Update Setting Model

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Whether a client's app should offer an update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AppUpdateChoice {
    /// Nothing selected yet (`""` on the wire)
    #[default]
    Unset,
    Yes,
    No,
}

impl AppUpdateChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppUpdateChoice::Unset => "",
            AppUpdateChoice::Yes => "Yes",
            AppUpdateChoice::No => "No",
        }
    }

    /// Lenient read of a backend value; anything unrecognized is `Unset`.
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for AppUpdateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppUpdateChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(AppUpdateChoice::Unset),
            v if v.eq_ignore_ascii_case("yes") => Ok(AppUpdateChoice::Yes),
            v if v.eq_ignore_ascii_case("no") => Ok(AppUpdateChoice::No),
            other => Err(ValidationError::InvalidAppUpdate(other.to_string())),
        }
    }
}

impl Serialize for AppUpdateChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppUpdateChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Self::from_wire).unwrap_or_default())
    }
}

/// Per-client update setting (`GET /api/app_update/:client_id`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUpdateSetting {
    #[serde(default)]
    pub app_update: AppUpdateChoice,
    #[serde(default, deserialize_with = "nullable_text")]
    pub download_link: String,
}

fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Upsert payload (`POST /api/app_update`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUpdateRequest {
    pub client_id: String,
    pub app_update: AppUpdateChoice,
    pub download_link: String,
}

/// Upsert response; fields the server omits are left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppUpdateResponse {
    #[serde(default)]
    pub app_update: Option<AppUpdateChoice>,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
