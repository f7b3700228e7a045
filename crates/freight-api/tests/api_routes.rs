use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use freight_api::{api_router, middleware::auth::AppState};
use freight_store::{AuthSettings, Store};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "Admin@2026";

async fn create_test_app() -> (Router, Store) {
    let store = Store::new(AuthSettings::default());
    store
        .bootstrap_admin("admin", "admin@depot.in", ADMIN_PASSWORD)
        .await
        .unwrap();
    store.seed_demo().await.unwrap();
    (api_router(AppState { store: store.clone() }), store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_with(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn admin_token(app: &Router) -> String {
    let (status, json) = send(
        app,
        post_json(
            "/api/v1/auth/login",
            None,
            json!({"username": "admin", "password": ADMIN_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (app, _) = create_test_app().await;
    let response = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            None,
            json!({"username": "admin", "password": ADMIN_PASSWORD}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_bad_password_is_401_with_detail() {
    let (app, _) = create_test_app().await;
    let (status, json) = send(
        &app,
        post_json(
            "/api/v1/auth/login",
            None,
            json!({"username": "admin", "password": "nope"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["detail"], "Invalid username or password");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (app, _) = create_test_app().await;
    let (status, json) = send(
        &app,
        Request::builder()
            .uri("/api/v1/vouchers")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["detail"].is_string());

    let (status, _) = send(&app, get_with("/api/v1/vouchers", "not-a-session")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let (app, _) = create_test_app().await;
    let token = admin_token(&app).await;
    let (status, json) = send(
        &app,
        Request::builder()
            .uri("/api/v1/users")
            .header(header::COOKIE, format!("theme=dark; session_token={token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_voucher_type_filter() {
    let (app, _) = create_test_app().await;
    let token = admin_token(&app).await;

    let (status, json) = send(&app, get_with("/api/v1/vouchers?type=invoice", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let vouchers = json["data"].as_array().unwrap();
    assert!(!vouchers.is_empty());
    assert!(vouchers.iter().all(|v| v["voucher_type"] == "invoice"));

    let (status, json) = send(&app, get_with("/api/v1/vouchers?type=", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let (status, _) = send(&app, get_with("/api/v1/vouchers?type=receipt", &token)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_price_override_validation_and_lookup() {
    let (app, store) = create_test_app().await;
    let token = admin_token(&app).await;
    let item = &store.list_items(None, Some("diesel")).await[0];
    let party = &store.list_parties(None).await[0];

    let (status, json) = send(
        &app,
        post_json(
            "/api/v1/pricing/overrides",
            Some(&token),
            json!({"item_id": item.id, "party_id": party.id, "rate": -4.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"], "Rate must be positive");

    let (status, _) = send(
        &app,
        post_json(
            "/api/v1/pricing/overrides",
            Some(&token),
            json!({"item_id": item.id, "party_id": party.id, "rate": 90.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!(
        "/api/v1/pricing/effective?item_id={}&party_id={}&location=Kolkata",
        item.id, party.id
    );
    let (status, json) = send(&app, get_with(&uri, &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["effective_price"], 90.0);
    assert_eq!(json["data"]["source"], "default_override");
}

#[tokio::test]
async fn test_admin_cannot_deactivate_self() {
    let (app, store) = create_test_app().await;
    let token = admin_token(&app).await;
    let admin = store
        .list_users()
        .await
        .into_iter()
        .find(|u| u.username == "admin")
        .unwrap();

    let (status, json) = send(
        &app,
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/users/{}/deactivate", admin.id))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["detail"], "You cannot deactivate your own account");
}

#[tokio::test]
async fn test_enquiries_are_public() {
    let (app, store) = create_test_app().await;
    let (status, json) = send(
        &app,
        post_json(
            "/api/v1/enquiries",
            None,
            json!({
                "name": "Anita Roy",
                "email": "anita@haldia-steel.in",
                "company": "Haldia Steel",
                "message": "Need 40 trucks for a Durgapur run."
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["channel"], "email");
    assert_eq!(store.list_enquiries().await.len(), 1);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (app, _) = create_test_app().await;
    let token = admin_token(&app).await;
    let (status, _) = send(&app, post_json("/api/v1/auth/logout", Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get_with("/api/v1/users", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
