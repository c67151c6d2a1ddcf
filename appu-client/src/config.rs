//! Client configuration

use std::path::PathBuf;

/// Backend the panel talks to when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://147.93.110.150:3001";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the panel backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3001")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted session file
    pub session_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            session_dir: default_session_dir(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `APPU_API_URL`: backend base URL
    /// - `APPU_TIMEOUT_SECS`: request timeout
    /// - `APPU_SESSION_DIR`: where the session file lives
    pub fn from_env() -> Self {
        let base_url = std::env::var("APPU_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let mut config = Self::new(base_url);
        if let Some(timeout) = std::env::var("APPU_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Some(dir) = std::env::var("APPU_SESSION_DIR")
            .ok()
            .filter(|s| !s.is_empty())
        {
            config.session_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the session directory
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// `$HOME/.appu-admin`, or `.appu-admin` in the working directory
fn default_session_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".appu-admin"),
        _ => PathBuf::from(".appu-admin"),
    }
}
