// appu-client/src/forms/login.rs
// Login and logout flows

use crate::api::PanelApi;
use crate::guard::Route;
use crate::http::HttpClient;
use crate::session::{Session, SessionStore};
use crate::{ClientError, ClientResult};
use shared::ValidationError;

/// Credentials draft for `POST /api/login`
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    loading: bool,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Exchange the credentials for a token and persist the session.
    ///
    /// Any backend failure, including a success without a token, comes back
    /// as [`ClientError::InvalidCredentials`]. On success the API carries the
    /// new token and the caller should go to [`Route::Dashboard`].
    pub async fn submit<C: HttpClient>(
        &mut self,
        api: &mut PanelApi<C>,
        store: SessionStore,
    ) -> ClientResult<Session> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("Username").into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password").into());
        }

        self.loading = true;
        let username = self.username.clone();
        let result = api.login(&username, &self.password).await;
        self.loading = false;

        let token = match result {
            Ok(resp) => match resp.token.filter(|t| !t.is_empty()) {
                Some(token) => token,
                None => {
                    tracing::warn!(username = %username, "Login response carried no token");
                    return Err(ClientError::InvalidCredentials);
                }
            },
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Login failed");
                return Err(ClientError::InvalidCredentials);
            }
        };

        let session = Session::start(store, token, &username)?;
        api.set_token(Some(session.token().to_string()));
        self.password.clear();
        tracing::info!(username = %username, "Logged in");
        Ok(session)
    }
}

/// Sign out. The server call is best-effort and skipped when no username is
/// stored; local state is cleared regardless.
pub async fn logout<C: HttpClient>(api: &mut PanelApi<C>, session: Session) -> ClientResult<Route> {
    match session.username() {
        Some(username) => {
            if let Err(e) = api.logout(username).await {
                tracing::warn!(username = %username, error = %e, "Server logout failed");
            }
        }
        None => tracing::debug!("No stored user, skipping server logout"),
    }
    api.set_token(None);
    session.clear()?;
    Ok(Route::Login)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{TOKEN_KEY, USER_KEY};
    use crate::testing::FakeHttpClient;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_login_persists_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        let mut api = PanelApi::new(
            FakeHttpClient::new().respond("POST", "/api/login", json!({"token": "abc"})),
        );

        let mut form = LoginForm::new("dev", "secret");
        let session = form.submit(&mut api, store.clone()).await.unwrap();
        assert_eq!(session.token(), "abc");
        assert_eq!(api.token(), Some("abc"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(store.get(USER_KEY).as_deref(), Some(r#"{"username":"dev"}"#));
        assert!(!form.is_loading());

        let sent = api.http().requests();
        assert_eq!(sent[0].json, Some(json!({"username": "dev", "password": "secret"})));
    }

    #[tokio::test]
    async fn test_username_sent_and_stored_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        let mut api = PanelApi::new(
            FakeHttpClient::new().respond("POST", "/api/login", json!({"token": "abc"})),
        );

        let session = LoginForm::new(" dev ", "secret")
            .submit(&mut api, store.clone())
            .await
            .unwrap();
        assert_eq!(session.username(), Some(" dev "));
        assert_eq!(store.get(USER_KEY).as_deref(), Some(r#"{"username":" dev "}"#));
        assert_eq!(
            api.http().requests()[0].json,
            Some(json!({"username": " dev ", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        let mut api = PanelApi::new(FakeHttpClient::new().fail("POST", "/api/login", 500, "db down"));
        let err = LoginForm::new("dev", "x").submit(&mut api, store.clone()).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidCredentials));

        let mut api = PanelApi::new(FakeHttpClient::new().respond("POST", "/api/login", json!({})));
        let err = LoginForm::new("dev", "x").submit(&mut api, store.clone()).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidCredentials));
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_blank_username_never_sent() {
        let dir = TempDir::new().unwrap();
        let mut api = PanelApi::new(FakeHttpClient::new());
        let err = LoginForm::new("  ", "x")
            .submit(&mut api, SessionStore::new(dir.path()))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(api.http().requests().is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        let session = Session::start(store.clone(), "tok".into(), "dev").unwrap();
        let mut api = PanelApi::new(FakeHttpClient::new().fail("POST", "/api/logout", 500, "nope"));
        api.set_token(Some("tok".into()));

        let route = logout(&mut api, session).await.unwrap();
        assert_eq!(route, Route::Login);
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(api.token().is_none());
        assert_eq!(api.http().requests()[0].json, Some(json!({"username": "dev"})));
    }

    #[tokio::test]
    async fn test_logout_without_user_skips_server() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        store.set(TOKEN_KEY, "tok").unwrap();
        let session = Session::load(store.clone()).unwrap();
        let mut api = PanelApi::new(FakeHttpClient::new());

        logout(&mut api, session).await.unwrap();
        assert!(api.http().requests().is_empty());
        assert!(Session::load(store).is_none());
    }
}
