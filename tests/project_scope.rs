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

async fn get(app: &Router, token: &str, uri: &str) -> Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576).await?;
    let value: Value = serde_json::from_slice(&bytes)?;
    Ok((status, value))
}

#[tokio::test]
async fn director_general_sees_all_projects() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "rajan.mehta@orgscope.dev").await?;

    let (status, projects) = get(&app, &token, "/projects").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(projects.as_array().context("array expected")?.len(), 5);

    Ok(())
}

#[tokio::test]
async fn center_heads_see_exactly_their_center() -> Result<()> {
    let app = test_app().await?;

    let token = login(&app, "asha.kulkarni@orgscope.dev").await?;
    let (status, projects) = get(&app, &token, "/projects").await?;
    assert_eq!(status, StatusCode::OK);
    let projects = projects.as_array().context("array expected")?;
    assert_eq!(projects.len(), 3);
    assert!(projects.iter().all(|p| p["center"] == "Pune"));

    let token = login(&app, "vikram.shinde@orgscope.dev").await?;
    let (_, projects) = get(&app, &token, "/projects").await?;
    let projects = projects.as_array().context("array expected")?;
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p["center"] == "Mumbai"));

    Ok(())
}

#[tokio::test]
async fn department_head_sees_own_department() -> Result<()> {
    let app = test_app().await?;
    let token = login(&app, "neha.joshi@orgscope.dev").await?;

    let (_, projects) = get(&app, &token, "/projects").await?;
    let projects = projects.as_array().context("array expected")?;
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p["department"] == "Software"));

    Ok(())
}

#[tokio::test]
async fn managers_and_coordinators_see_managed_projects() -> Result<()> {
    let app = test_app().await?;

    let token = login(&app, "sameer.deshpande@orgscope.dev").await?;
    let (_, projects) = get(&app, &token, "/projects").await?;
    assert_eq!(projects.as_array().context("array expected")?.len(), 2);

    let token = login(&app, "kavita.rao@orgscope.dev").await?;
    let (_, projects) = get(&app, &token, "/projects").await?;
    let projects = projects.as_array().context("array expected")?;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Campus Access Portal");

    Ok(())
}

#[tokio::test]
async fn contributors_see_assigned_projects() -> Result<()> {
    let app = test_app().await?;

    let token = login(&app, "priya.nair@orgscope.dev").await?;
    let (_, projects) = get(&app, &token, "/projects").await?;
    assert_eq!(projects.as_array().context("array expected")?.len(), 2);

    let token = login(&app, "sneha.gokhale@orgscope.dev").await?;
    let (_, projects) = get(&app, &token, "/projects").await?;
    let projects = projects.as_array().context("array expected")?;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Smart Metering Rollout");

    Ok(())
}

#[tokio::test]
async fn project_detail_is_scoped() -> Result<()> {
    let app = test_app().await?;
    let harbor_link = Uuid::from_u128(103);

    // A Mumbai project is out of scope for the Pune center head.
    let token = login(&app, "asha.kulkarni@orgscope.dev").await?;
    let (status, _) = get(&app, &token, &format!("/projects/{harbor_link}")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // In scope for the Mumbai center head.
    let token = login(&app, "vikram.shinde@orgscope.dev").await?;
    let (status, project) = get(&app, &token, &format!("/projects/{harbor_link}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["title"], "Harbor Link Survey");

    Ok(())
}
