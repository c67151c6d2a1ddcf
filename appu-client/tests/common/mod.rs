// appu-client/tests/common/mod.rs
// In-process panel backend for integration tests

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const USERNAME: &str = "dev";
pub const PASSWORD: &str = "Secret1!";

#[derive(Debug, Default)]
pub struct MockState {
    pub password: String,
    pub tokens: Vec<String>,
    pub logged_out: Vec<String>,
    pub clients: Vec<Map<String, Value>>,
    pub images: HashMap<String, Vec<u8>>,
    pub app_updates: HashMap<String, Value>,
    next_id: u64,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    /// Serve on an ephemeral port until the test runtime shuts down
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            password: PASSWORD.into(),
            next_id: 1,
            ..Default::default()
        }));
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Drop every issued token, as if they expired server-side
    pub fn revoke_tokens(&self) {
        self.state.lock().unwrap().tokens.clear();
    }

    pub fn seed_client(&self, client: Value) {
        let mut state = self.state.lock().unwrap();
        if let Value::Object(map) = client {
            state.clients.push(map);
        }
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/change-password", post(change_password))
        .route("/api/clients", get(list_clients))
        .route("/api/add_client", post(add_client))
        .route("/api/update_client", put(update_client))
        .route("/api/upload-image", post(upload_image))
        .route("/api/client-image/{name}", get(client_image))
        .route("/api/app_update/{client_id}", get(get_app_update))
        .route("/api/app_update", post(upsert_app_update))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    let Some(token) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    else {
        return false;
    };
    state.lock().unwrap().tokens.iter().any(|t| t == token)
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Response {
    let mut state = state.lock().unwrap();
    if body.username != USERNAME || body.password != state.password {
        return error(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    let token = format!("tok-{}", uuid::Uuid::new_v4());
    state.tokens.push(token.clone());
    Json(json!({ "message": "Login successful", "token": token })).into_response()
}

#[derive(Deserialize)]
struct LogoutBody {
    username: String,
}

async fn logout(State(state): State<Shared>, Json(body): Json<LogoutBody>) -> Response {
    state.lock().unwrap().logged_out.push(body.username);
    Json(json!({ "message": "Logged out" })).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordBody {
    current_password: String,
    new_password: String,
}

async fn change_password(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<ChangePasswordBody>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut state = state.lock().unwrap();
    if body.current_password != state.password {
        return error(StatusCode::BAD_REQUEST, "Current password is incorrect");
    }
    state.password = body.new_password;
    state.tokens.clear();
    Json(json!({ "message": "Password changed" })).into_response()
}

async fn list_clients(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let clients = state.lock().unwrap().clients.clone();
    Json(clients).into_response()
}

/// Text fields and files of a multipart body
#[derive(Default)]
struct Form {
    fields: Map<String, Value>,
    files: HashMap<String, (String, Bytes)>,
}

async fn read_form(mut multipart: Multipart) -> Form {
    let mut form = Form::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap_or_default();
                form.files.insert(name, (file_name, bytes));
            }
            None => {
                let text = field.text().await.unwrap_or_default();
                form.fields.insert(name, Value::String(text));
            }
        }
    }
    form
}

fn store_image(state: &mut MockState, file_name: &str, bytes: Bytes) -> String {
    let stored = format!("{}-{file_name}", uuid::Uuid::new_v4().simple());
    state.images.insert(stored.clone(), bytes.to_vec());
    stored
}

async fn add_client(State(state): State<Shared>, headers: HeaderMap, multipart: Multipart) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut form = read_form(multipart).await;
    let mut state = state.lock().unwrap();

    let id = state.next_id;
    state.next_id += 1;
    let image = match form.files.remove("image") {
        Some((name, bytes)) => store_image(&mut state, &name, bytes),
        None => String::new(),
    };
    let mut record = form.fields;
    record.insert("client_id".into(), json!(id));
    record.insert("image".into(), json!(image));
    record.insert("created_at".into(), json!("2026-10-19T09:30:00"));
    record.insert("updated_at".into(), json!("2026-10-19T09:30:00"));
    state.clients.push(record);

    Json(json!({ "message": "Client added", "client_id": id, "imageFileName": image })).into_response()
}

async fn update_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let form = read_form(multipart).await;
    let id = form
        .fields
        .get("client_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let image = form
        .fields
        .get("existingImage")
        .or_else(|| form.fields.get("image"))
        .cloned()
        .unwrap_or(json!(""));

    let mut state = state.lock().unwrap();
    let Some(record) = state
        .clients
        .iter_mut()
        .find(|c| c.get("client_id").map(value_text).as_deref() == Some(id.as_str()))
    else {
        return error(StatusCode::NOT_FOUND, "Client not found");
    };
    for (key, value) in form.fields {
        if key != "existingImage" && key != "client_id" {
            record.insert(key, value);
        }
    }
    record.insert("image".into(), image.clone());
    record.insert("updated_at".into(), json!("2026-10-20T14:45:00"));

    Json(json!({ "message": "Client updated", "imageFileName": image })).into_response()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn upload_image(State(state): State<Shared>, headers: HeaderMap, multipart: Multipart) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut form = read_form(multipart).await;
    let Some((name, bytes)) = form.files.remove("image") else {
        return error(StatusCode::BAD_REQUEST, "No image uploaded");
    };
    let mut state = state.lock().unwrap();
    if let Some(Value::String(old)) = form.fields.get("oldImage") {
        state.images.remove(old);
    }
    let stored = store_image(&mut state, &name, bytes);
    Json(json!({ "imageFileName": stored })).into_response()
}

async fn client_image(State(state): State<Shared>, Path(name): Path<String>) -> Response {
    match state.lock().unwrap().images.get(&name) {
        Some(bytes) => (StatusCode::OK, bytes.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Image not found"),
    }
}

async fn get_app_update(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(client_id): Path<String>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let setting = state
        .lock()
        .unwrap()
        .app_updates
        .get(&client_id)
        .cloned()
        .unwrap_or_else(|| json!({ "app_update": "", "download_link": "" }));
    Json(setting).into_response()
}

#[derive(Deserialize)]
struct AppUpdateBody {
    client_id: String,
    app_update: String,
    download_link: String,
}

async fn upsert_app_update(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<AppUpdateBody>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if body.app_update != "Yes" && body.app_update != "No" {
        return error(StatusCode::BAD_REQUEST, "Invalid app_update value");
    }
    let setting = json!({ "app_update": body.app_update, "download_link": body.download_link });
    state
        .lock()
        .unwrap()
        .app_updates
        .insert(body.client_id, setting.clone());
    let mut resp = setting;
    resp["message"] = json!("App update saved");
    Json(resp).into_response()
}
