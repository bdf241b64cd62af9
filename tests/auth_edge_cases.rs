use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use orgscope::create_app;
use orgscope::directory::seed::DEMO_PASSWORD;
use orgscope::directory::Directory;

async fn test_app() -> Result<Router> {
    std::env::set_var("JWT_SECRET", "test-secret");
    let directory = std::sync::Arc::new(Directory::load_seed()?);
    Ok(create_app(directory).await?)
}

async fn login(app: &Router, email: &str) -> Result<String> {
    let body = json!({ "email": email, "password": DEMO_PASSWORD });
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    let resp = app.clone().oneshot(req).await?;
    anyhow::ensure!(resp.status() == StatusCode::OK, "login failed for {email}");
    let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576).await?;
    let auth: Value = serde_json::from_slice(&bytes)?;
    Ok(auth["token"].as_str().context("missing token")?.to_string())
}

#[tokio::test]
async fn auth_edge_cases() -> Result<()> {
    let app = test_app().await?;

    // 1. Login with an email not present in the directory
    let body = json!({ "email": "nobody@orgscope.dev", "password": DEMO_PASSWORD });
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(
        resp.status(),
        StatusCode::UNAUTHORIZED,
        "unknown email must not authenticate"
    );

    // 2. Login with the wrong password
    let body = json!({ "email": "priya.nair@orgscope.dev", "password": "wrongpassword" });
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 3. Protected route without a token
    let req = Request::builder()
        .method("GET")
        .uri("/projects")
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 4. Protected route with a garbage token
    let req = Request::builder()
        .method("GET")
        .uri("/projects")
        .header("authorization", "Bearer not-a-token")
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn me_returns_the_authenticated_principal() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "priya.nair@orgscope.dev").await?;

    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576).await?;
    let user: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(user["email"], "priya.nair@orgscope.dev");
    assert_eq!(user["role"], "project_engineer");
    assert_eq!(user["center"], "Pune");

    Ok(())
}

#[tokio::test]
async fn logout_invalidates_the_session() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "priya.nair@orgscope.dev").await?;

    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // The token still decodes, but the session is closed.
    let req = Request::builder()
        .method("GET")
        .uri("/auth/me")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
