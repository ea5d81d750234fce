use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody, Role};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- roles ---

#[tokio::test]
async fn list_roles_empty() {
    let resp = app().oneshot(get("/admin/roles/list")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let roles: Vec<Role> = body_json(resp).await;
    assert!(roles.is_empty());
}

#[tokio::test]
async fn create_role_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/admin/roles/new",
            r#"{"name":"buyer","permissions":["orders:read"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let role: Role = body_json(resp).await;
    assert_eq!(role.name, "buyer");
    assert_eq!(role.permissions, vec!["orders:read".to_string()]);
}

#[tokio::test]
async fn create_role_blank_name_returns_422_with_message() {
    let resp = app()
        .oneshot(json_request("POST", "/admin/roles/new", r#"{"name":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.message, "name is required");
}

#[tokio::test]
async fn get_role_not_found_has_json_message() {
    let resp = app()
        .oneshot(get("/admin/roles/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.message, "not found");
}

#[tokio::test]
async fn get_role_bad_id_returns_400() {
    let resp = app().oneshot(get("/admin/roles/not-a-uuid")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_role_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/admin/roles/00000000-0000-0000-0000-000000000000")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- canned responses ---

#[tokio::test]
async fn status_route_echoes_reason_phrase() {
    let resp = app().oneshot(get("/test/status/404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"message": "not found"}));

    let resp = app().oneshot(get("/test/status/503")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn json_route_returns_fixed_item() {
    let resp = app().oneshot(get("/test/json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"id": 1}));
}

#[tokio::test]
async fn malformed_route_claims_json() {
    let resp = app().oneshot(get("/test/malformed")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

#[tokio::test]
async fn text_route_is_plain_text() {
    let resp = app().oneshot(get("/test/text")).await.unwrap();
    let content_type = resp.headers().get(http::header::CONTENT_TYPE).unwrap().clone();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    assert_eq!(body_bytes(resp).await, "pong");
}

#[tokio::test]
async fn no_content_route_has_empty_body() {
    let resp = app().oneshot(get("/test/no-content")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

// --- echo fallback ---

#[tokio::test]
async fn unknown_paths_are_echoed() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/user/address/abc123/default?x=1",
            r#"{"k":"v"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Value = body_json(resp).await;
    assert_eq!(echo["method"], "PUT");
    assert_eq!(echo["path"], "/user/address/abc123/default");
    assert_eq!(echo["query"], "x=1");
    assert_eq!(echo["content_type"], "application/json");
    assert_eq!(echo["body"], r#"{"k":"v"}"#);
}

// --- full role lifecycle ---

#[tokio::test]
async fn role_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/admin/roles/new", r#"{"name":"seller"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Role = body_json(resp).await;
    let id = created.id;

    // list contains it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/admin/roles/list"))
        .await
        .unwrap();
    let roles: Vec<Role> = body_json(resp).await;
    assert_eq!(roles, vec![created.clone()]);

    // partial update keeps the name
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/admin/roles/{id}"),
            r#"{"permissions":["catalog:write"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Role = body_json(resp).await;
    assert_eq!(updated.name, "seller");
    assert_eq!(updated.permissions, vec!["catalog:write".to_string()]);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/admin/roles/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/admin/roles/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
