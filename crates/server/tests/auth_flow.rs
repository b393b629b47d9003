mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::build_app;
use service::auth::service::{PASSWORD_RESET_SUBJECT, VERIFICATION_SUBJECT};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "S3curePass!";

async fn register(app: &common::TestApp) -> anyhow::Result<String> {
    let (status, body) = app
        .post("/api/v1/authentication/register", json!({"email": EMAIL, "password": PASSWORD}))
        .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "User registered successfully");
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let app = build_app().await?;
    let token = register(&app).await?;
    assert!(!token.is_empty());

    let (status, body) = app
        .post("/api/v1/authentication/login", json!({"email": EMAIL, "password": PASSWORD}))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Authentication Succeeded");

    let (status, user) = app.send("GET", "/api/v1/authentication/user", None, Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], EMAIL);
    assert_eq!(user["emailVerified"], false);
    assert!(user.get("passwordHash").is_none());
    Ok(())
}

#[tokio::test]
async fn test_login_errors() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app).await?;

    let (status, body) = app
        .post("/api/v1/authentication/login", json!({"email": EMAIL, "password": "wrong"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password is incorrect");

    let (status, body) = app
        .post("/api/v1/authentication/login", json!({"email": "nobody@example.com", "password": PASSWORD}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User not found. Please sign up first.");
    Ok(())
}

#[tokio::test]
async fn test_register_validation() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app).await?;

    let (status, body) = app
        .post("/api/v1/authentication/register", json!({"email": EMAIL, "password": PASSWORD}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("An account with this email already exists"));

    let (status, body) = app
        .post("/api/v1/authentication/register", json!({"email": "not-an-email", "password": PASSWORD}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Please enter a valid email address"));

    let (status, body) = app.post("/api/v1/authentication/register", json!({"email": "x@example.com"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password is required");
    Ok(())
}

#[tokio::test]
async fn test_protected_routes_require_token() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = app.get("/api/v1/authentication/user").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = app.send("GET", "/api/v1/authentication/user", None, Some("garbage")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_email_verification_flow() -> anyhow::Result<()> {
    let app = build_app().await?;
    let token = register(&app).await?;
    let code = app.mailer.last_code(EMAIL, VERIFICATION_SUBJECT).expect("verification email");

    let wrong = if code == "00000" { "11111" } else { "00000" };
    let uri = format!("/api/v1/authentication/validate-email-verification-token?token={wrong}");
    let (status, body) = app.send("PUT", &uri, None, Some(&token)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email verification token failed.");

    let uri = format!("/api/v1/authentication/validate-email-verification-token?token={code}");
    let (status, body) = app.send("PUT", &uri, None, Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email verified successfully");

    let (_, user) = app.send("GET", "/api/v1/authentication/user", None, Some(&token)).await?;
    assert_eq!(user["emailVerified"], true);

    // verified accounts cannot request another code
    let (status, _) = app
        .send("GET", "/api/v1/authentication/send-email-verification-token", None, Some(&token))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_password_reset_flow() -> anyhow::Result<()> {
    let app = build_app().await?;
    register(&app).await?;

    let (status, body) = app
        .send("PUT", "/api/v1/authentication/send-password-reset-token?email=nobody@example.com", None, None)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User not found.");

    let (status, _) = app
        .send("PUT", &format!("/api/v1/authentication/send-password-reset-token?email={EMAIL}"), None, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let code = app.mailer.last_code(EMAIL, PASSWORD_RESET_SUBJECT).expect("reset email");

    let uri = format!("/api/v1/authentication/reset-password?email={EMAIL}&token={code}&newPassword=N3wPassword");
    let (status, body) = app.send("PUT", &uri, None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset successfully");

    // the code is single use
    let (status, body) = app.send("PUT", &uri, None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password token expired.");

    let (status, _) = app
        .post("/api/v1/authentication/login", json!({"email": EMAIL, "password": "N3wPassword"}))
        .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/authentication/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let (status, body) = app.call(req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Malformed request body"));
    Ok(())
}
