//! In-memory [`HttpClient`] for unit tests

use crate::http::{HttpClient, MultipartBody};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// A request the fake received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub json: Option<Value>,
    pub multipart: Option<MultipartBody>,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
enum Canned {
    Ok(Value),
    Bytes(Vec<u8>),
    Status(u16, String),
}

/// Canned responses keyed by method and path; unknown routes answer 404.
#[derive(Debug, Default)]
pub struct FakeHttpClient {
    routes: HashMap<(String, String), Canned>,
    requests: Mutex<Vec<RecordedRequest>>,
    token: Option<String>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, method: &str, path: &str, body: Value) -> Self {
        self.routes
            .insert((method.into(), path.into()), Canned::Ok(body));
        self
    }

    pub fn respond_bytes(mut self, method: &str, path: &str, bytes: Vec<u8>) -> Self {
        self.routes
            .insert((method.into(), path.into()), Canned::Bytes(bytes));
        self
    }

    pub fn fail(mut self, method: &str, path: &str, status: u16, message: &str) -> Self {
        self.routes.insert(
            (method.into(), path.into()),
            Canned::Status(status, message.into()),
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, req: RecordedRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req);
        }
    }

    fn canned(&self, method: &str, path: &str) -> ClientResult<Canned> {
        match self.routes.get(&(method.to_string(), path.to_string())) {
            Some(Canned::Status(401, _)) => Err(ClientError::Unauthorized),
            Some(Canned::Status(403, message)) => Err(ClientError::Forbidden(message.clone())),
            Some(Canned::Status(404, message)) => Err(ClientError::NotFound(message.clone())),
            Some(Canned::Status(status, message)) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
            Some(canned) => Ok(canned.clone()),
            None => Err(ClientError::NotFound(path.to_string())),
        }
    }

    fn answer<T: DeserializeOwned>(&self, method: &str, path: &str) -> ClientResult<T> {
        match self.canned(method, path)? {
            Canned::Ok(value) => Ok(serde_json::from_value(value)?),
            _ => Err(ClientError::InvalidResponse("expected JSON".into())),
        }
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.record(RecordedRequest {
            method: "GET",
            path: path.into(),
            json: None,
            multipart: None,
            token: self.token.clone(),
        });
        self.answer("GET", path)
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        self.record(RecordedRequest {
            method: "GET",
            path: path.into(),
            json: None,
            multipart: None,
            token: None,
        });
        match self.canned("GET", path)? {
            Canned::Bytes(bytes) => Ok(bytes),
            _ => Err(ClientError::InvalidResponse("expected bytes".into())),
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.record(RecordedRequest {
            method: "POST",
            path: path.into(),
            json: serde_json::to_value(body).ok(),
            multipart: None,
            token: self.token.clone(),
        });
        self.answer("POST", path)
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> ClientResult<T> {
        self.record(RecordedRequest {
            method: "POST",
            path: path.into(),
            json: None,
            multipart: Some(body),
            token: self.token.clone(),
        });
        self.answer("POST", path)
    }

    async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> ClientResult<T> {
        self.record(RecordedRequest {
            method: "PUT",
            path: path.into(),
            json: None,
            multipart: Some(body),
            token: self.token.clone(),
        });
        self.answer("PUT", path)
    }

    fn base_url(&self) -> &str {
        "http://fake.local"
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}
