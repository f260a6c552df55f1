//! Integration tests for the HTTP authenticator against an in-process
//! backend.

use std::net::SocketAddr;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::json;
use stride::prelude::*;

// =========================================================================
// Fake backend
// =========================================================================

/// Accepts `coach@example.com` / `secret`. Other addresses on
/// `@broken.io` get an HTML error page, `@empty.io` gets a 200 with an
/// empty token, everything else a JSON error body.
async fn login(Json(credentials): Json<Credentials>) -> Response {
    if credentials.email.ends_with("@broken.io") {
        return (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response();
    }
    if credentials.email.ends_with("@empty.io") {
        return Json(json!({
            "access_token": "",
            "user": { "id": 1, "name": "Empty", "email": credentials.email },
        }))
        .into_response();
    }
    if credentials.email == "coach@example.com" && credentials.password == "secret" {
        return Json(json!({
            "access_token": "jwt-abc",
            "user": { "id": 7, "name": "Coach Rita", "email": "coach@example.com" },
        }))
        .into_response();
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Usuário ou senha incorretos." })),
    )
        .into_response()
}

/// Rejects an already-registered address with a JSON message and
/// `@broken.io` with an empty 500.
async fn register(Json(body): Json<serde_json::Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if email.ends_with("@broken.io") {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if email == "coach@example.com" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "E-mail já cadastrado." })),
        )
            .into_response();
    }
    if body["role"] != "aluno" || body["password"] != body["password_confirmation"] {
        return StatusCode::BAD_REQUEST.into_response();
    }
    (StatusCode::CREATED, Json(json!({ "id": 8 }))).into_response()
}

/// Starts the backend on a random port and returns its base URL.
async fn start_backend() -> String {
    let app = Router::new()
        .route("/api", post(login))
        .route("/api/register", post(register));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr: SocketAddr = listener.local_addr().expect("should have local addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}/api")
}

fn config(api_url: String) -> DashboardConfig {
    DashboardConfig {
        api_url,
        ..DashboardConfig::default()
    }
}

// =========================================================================
// HttpAuthenticator
// =========================================================================

#[tokio::test]
async fn test_authenticate_valid_credentials_returns_token_and_user() {
    let url = start_backend().await;
    let auth = HttpAuthenticator::new(url);

    let response = auth
        .authenticate(&Credentials::new("coach@example.com", "secret"))
        .await
        .expect("login should succeed");

    assert_eq!(response.access_token, "jwt-abc");
    assert_eq!(response.user.id, UserId(7));
    assert_eq!(response.user.name, "Coach Rita");
}

#[tokio::test]
async fn test_authenticate_wrong_password_uses_backend_message() {
    let url = start_backend().await;
    let auth = HttpAuthenticator::new(url);

    let err = auth
        .authenticate(&Credentials::new("coach@example.com", "nope"))
        .await
        .unwrap_err();

    match err {
        SessionError::AuthFailed(message) => assert_eq!(message, "Usuário ou senha incorretos."),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authenticate_non_json_error_falls_back_to_generic_message() {
    let url = start_backend().await;
    let auth = HttpAuthenticator::new(url);

    let err = auth
        .authenticate(&Credentials::new("x@broken.io", "pw"))
        .await
        .unwrap_err();

    match err {
        SessionError::AuthFailed(message) => assert_eq!(message, "invalid email or password"),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authenticate_closed_port_is_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let auth = HttpAuthenticator::new(format!("http://{addr}/api"));
    let err = auth
        .authenticate(&Credentials::new("coach@example.com", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Unreachable(_)));
}

// =========================================================================
// Dashboard over HTTP
// =========================================================================

#[tokio::test]
async fn test_dashboard_sign_in_remember_stores_persistently() {
    let url = start_backend().await;
    let dashboard = Dashboard::builder().config(config(url)).build_http().unwrap();
    let observer = dashboard.mount_observer();

    let user = dashboard
        .sign_in(&Credentials::new("coach@example.com", "secret"), true)
        .await
        .unwrap();

    assert_eq!(user.email, "coach@example.com");
    assert!(observer.status().is_authenticated);

    let session = dashboard.store().session().unwrap();
    assert_eq!(session.token, "jwt-abc");
    assert_eq!(session.persistence, Scope::Persistent);
    assert_eq!(session.user, Some(user));
}

#[tokio::test]
async fn test_dashboard_sign_in_rejected_leaves_session_empty() {
    let url = start_backend().await;
    let dashboard = Dashboard::builder().config(config(url)).build_http().unwrap();
    let observer = dashboard.mount_observer();

    let err = dashboard
        .sign_in(&Credentials::new("coach@example.com", "wrong"), true)
        .await
        .unwrap_err();

    assert!(matches!(err, StrideError::Session(SessionError::AuthFailed(_))));
    assert!(!observer.status().is_authenticated);
    assert!(dashboard.store().session().is_none());
}

#[tokio::test]
async fn test_dashboard_sign_in_empty_token_is_rejected() {
    let url = start_backend().await;
    let dashboard = Dashboard::builder().config(config(url)).build_http().unwrap();

    let err = dashboard
        .sign_in(&Credentials::new("who@empty.io", "pw"), false)
        .await
        .unwrap_err();

    assert!(matches!(err, StrideError::Session(SessionError::Codec(_))));
    assert!(!dashboard.status().is_authenticated);
}

// =========================================================================
// Registration
// =========================================================================

#[tokio::test]
async fn test_register_new_account_succeeds_without_signing_in() {
    let url = start_backend().await;
    let dashboard = Dashboard::builder().config(config(url)).build_http().unwrap();

    dashboard
        .register(&Registration::new("Lia", "lia@example.com", "pw123", "pw123"))
        .await
        .expect("registration should succeed");

    assert!(!dashboard.status().is_authenticated);
}

#[tokio::test]
async fn test_register_mismatched_confirmation_fails_before_sending() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let auth = HttpAuthenticator::new(format!("http://{addr}/api"));

    let err = auth
        .register(&Registration::new("Lia", "lia@example.com", "pw123", "pw124"))
        .await
        .unwrap_err();

    // Nothing listens on the port, so only the local check can fail.
    assert!(matches!(err, StrideError::Protocol(_)));
}

#[tokio::test]
async fn test_register_taken_email_uses_backend_message() {
    let url = start_backend().await;
    let auth = HttpAuthenticator::from_config(&config(url));

    let err = auth
        .register(&Registration::new("Rita", "coach@example.com", "pw", "pw"))
        .await
        .unwrap_err();

    match err {
        StrideError::Registration(message) => assert_eq!(message, "E-mail já cadastrado."),
        other => panic!("expected Registration, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_empty_error_body_falls_back_to_generic_message() {
    let url = start_backend().await;
    let auth = HttpAuthenticator::from_config(&config(url));

    let err = auth
        .register(&Registration::new("X", "x@broken.io", "pw", "pw"))
        .await
        .unwrap_err();

    match err {
        StrideError::Registration(message) => {
            assert_eq!(message, "could not create the account")
        }
        other => panic!("expected Registration, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_closed_port_is_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let auth = HttpAuthenticator::new(format!("http://{addr}/api"));

    let err = auth
        .register(&Registration::new("Lia", "lia@example.com", "pw", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StrideError::Session(SessionError::Unreachable(_))
    ));
}
