use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateRole {
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateRole {
    pub name: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// Error body in the backend's conventional shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

pub type Db = Arc<RwLock<HashMap<Uuid, Role>>>;

/// Routes:
/// - `/admin/roles/...`: in-memory role CRUD
/// - `/test/...`: canned responses for exercising client edge cases
/// - anything else: echoes the request back as JSON
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/admin/roles/list", get(list_roles))
        .route("/admin/roles/new", post(create_role))
        .route(
            "/admin/roles/{id}",
            get(get_role).put(update_role).delete(delete_role),
        )
        .route("/test/status/{code}", get(status_with_message))
        .route("/test/json", get(json_item))
        .route("/test/text", get(plain_text))
        .route("/test/malformed", get(malformed_json))
        .route("/test/delay/{ms}", get(delayed))
        .route("/test/no-content", get(no_content))
        .fallback(echo)
        .layer(middleware::from_fn(log_requests))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    info!(%method, %path, status = response.status().as_u16(), "handled request");
    response
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| error(StatusCode::BAD_REQUEST, format!("invalid role id {raw:?}")))
}

async fn list_roles(State(db): State<Db>) -> Json<Vec<Role>> {
    let roles = db.read().await;
    let mut list: Vec<Role> = roles.values().cloned().collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    Json(list)
}

async fn create_role(
    State(db): State<Db>,
    Json(input): Json<CreateRole>,
) -> Result<(StatusCode, Json<Role>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "name is required"));
    }
    let role = Role {
        id: Uuid::new_v4(),
        name: input.name,
        permissions: input.permissions,
    };
    db.write().await.insert(role.id, role.clone());
    Ok((StatusCode::CREATED, Json(role)))
}

async fn get_role(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Role>, ApiError> {
    let id = parse_id(&id)?;
    let roles = db.read().await;
    roles
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not found"))
}

async fn update_role(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateRole>,
) -> Result<Json<Role>, ApiError> {
    let id = parse_id(&id)?;
    let mut roles = db.write().await;
    let role = roles
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not found"))?;
    if let Some(name) = input.name {
        role.name = name;
    }
    if let Some(permissions) = input.permissions {
        role.permissions = permissions;
    }
    Ok(Json(role.clone()))
}

async fn delete_role(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let mut roles = db.write().await;
    roles
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not found"))
}

/// Respond with `code` and `{"message": "<lowercased reason phrase>"}`.
async fn status_with_message(Path(code): Path<u16>) -> Result<ApiError, ApiError> {
    let status = StatusCode::from_u16(code)
        .map_err(|_| error(StatusCode::BAD_REQUEST, format!("invalid status {code}")))?;
    let reason = status.canonical_reason().unwrap_or("unknown").to_lowercase();
    Ok(error(status, reason))
}

async fn json_item() -> Json<Value> {
    Json(json!({ "id": 1 }))
}

async fn plain_text() -> &'static str {
    "pong"
}

async fn malformed_json() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/json")], "{\"id\": 1,")
}

async fn delayed(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({ "delayed_ms": ms }))
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "content_type": content_type,
        "body": body,
    }))
}
