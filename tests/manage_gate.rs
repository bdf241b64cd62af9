use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

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

async fn send(
    app: &Router,
    token: &str,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));
    let req = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(value.to_string()))?
        }
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576).await?;
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

fn create_body(department: &str) -> Value {
    json!({
        "title": "Substation Telemetry",
        "category": "funded",
        "center": "Pune",
        "department": department,
        "manager": Uuid::from_u128(7),
        "deadline": "2026-05-01T00:00:00Z"
    })
}

#[tokio::test]
async fn contributors_cannot_manage() -> Result<()> {
    let app = test_app().await?;

    let token = login(&app, "priya.nair@orgscope.dev").await?;
    let (status, _) = send(&app, &token, "POST", "/projects", Some(create_body("Software"))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let smart_metering = Uuid::from_u128(101);
    let (status, _) = send(&app, &token, "DELETE", &format!("/projects/{smart_metering}"), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn department_head_is_scoped_to_own_department() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "neha.joshi@orgscope.dev").await?;

    let (status, record) = send(&app, &token, "POST", "/projects", Some(create_body("Software"))).await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(record["event_name"], "project.create_requested");
    assert_eq!(record["severity"], "critical");

    let (status, _) = send(&app, &token, "POST", "/projects", Some(create_body("Civil"))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Another department's project cannot be deleted either.
    let harbor_link = Uuid::from_u128(103);
    let (status, _) = send(&app, &token, "DELETE", &format!("/projects/{harbor_link}"), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn center_head_manages_unconditionally() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "asha.kulkarni@orgscope.dev").await?;

    let harbor_link = Uuid::from_u128(103);
    let (status, record) = send(&app, &token, "DELETE", &format!("/projects/{harbor_link}"), None).await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(record["event_name"], "project.delete_requested");

    Ok(())
}

#[tokio::test]
async fn assignment_validates_the_user() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "rajan.mehta@orgscope.dev").await?;
    let smart_metering = Uuid::from_u128(101);

    let (status, _) = send(
        &app,
        &token,
        "POST",
        &format!("/projects/{smart_metering}/assign"),
        Some(json!({ "user_id": Uuid::new_v4() })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, record) = send(
        &app,
        &token,
        "POST",
        &format!("/projects/{smart_metering}/assign"),
        Some(json!({ "user_id": Uuid::from_u128(11) })),
    )
    .await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(record["event_name"], "project.assign_requested");

    Ok(())
}

#[tokio::test]
async fn intents_are_recorded_but_never_applied() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "rajan.mehta@orgscope.dev").await?;

    let (_, before) = send(&app, &token, "GET", "/projects", None).await?;
    let before_count = before.as_array().context("array expected")?.len();

    let (status, _) = send(&app, &token, "POST", "/projects", Some(create_body("Software"))).await?;
    assert_eq!(status, StatusCode::ACCEPTED);

    let harbor_link = Uuid::from_u128(103);
    let (status, _) = send(&app, &token, "DELETE", &format!("/projects/{harbor_link}"), None).await?;
    assert_eq!(status, StatusCode::ACCEPTED);

    // Listings are untouched by recorded intents.
    let (_, after) = send(&app, &token, "GET", "/projects", None).await?;
    assert_eq!(after.as_array().context("array expected")?.len(), before_count);

    // The log keeps both records and chains their hashes.
    let (status, intents) = send(&app, &token, "GET", "/intents", None).await?;
    assert_eq!(status, StatusCode::OK);
    let intents = intents.as_array().context("array expected")?;
    assert_eq!(intents.len(), 2);
    assert!(intents[0]["prev_hash"].is_null());
    assert_eq!(intents[1]["prev_hash"], intents[0]["hash"]);

    Ok(())
}

#[tokio::test]
async fn intent_log_is_manage_gated() -> Result<()> {
    let app = test_app().await?;

    let token = login(&app, "priya.nair@orgscope.dev").await?;
    let (status, _) = send(&app, &token, "GET", "/intents", None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Department heads hold no portal-wide manage rights either.
    let token = login(&app, "neha.joshi@orgscope.dev").await?;
    let (status, _) = send(&app, &token, "GET", "/intents", None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let token = login(&app, "asha.kulkarni@orgscope.dev").await?;
    let (status, _) = send(&app, &token, "GET", "/intents", None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}
