use anyhow::{Context, Result};
use serde_json::Value;

use orgscope::docs;

#[test]
fn openapi_document_covers_the_surface() -> Result<()> {
    let doc = docs::build_openapi(8000)?;
    let doc: Value = serde_json::to_value(&doc)?;

    let paths = doc["paths"].as_object().context("paths object expected")?;
    for path in [
        "/auth/login",
        "/auth/me",
        "/auth/logout",
        "/projects",
        "/projects/{project_id}",
        "/tasks",
        "/team",
        "/chat/peers",
        "/chat/rooms",
        "/intents",
        "/api/health",
    ] {
        assert!(paths.contains_key(path), "missing path: {path}");
    }

    let bearer = &doc["components"]["securitySchemes"]["bearerAuth"];
    assert_eq!(bearer["scheme"], "bearer");
    assert_eq!(bearer["bearerFormat"], "JWT");

    let servers = doc["servers"].as_array().context("servers array expected")?;
    assert!(servers
        .iter()
        .any(|s| s["url"] == "http://localhost:8000"));

    Ok(())
}
