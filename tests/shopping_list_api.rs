use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

mod helpers;

use helpers::{HOUSEHOLD, TENANT};

fn request(method: &str, uri: &str, tenant: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tenant) = tenant {
        builder = builder.header("x-tenant-id", tenant);
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = homeplan::create_app(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, request("GET", "/ready", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    Ok(())
}

#[tokio::test]
async fn test_generate_and_read_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let plan = helpers::pancake_plan(&state).await?;
    let app = homeplan::create_app(state);

    let (status, list) = send(
        &app,
        request(
            "POST",
            &format!("/api/meal-plans/{plan}/shopping-list"),
            Some(TENANT),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list["status"], "active");
    assert_eq!(list["meal_plan_id"], plan.as_str());

    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Milk");
    assert_eq!(items[0]["quantity"], 600.0);
    assert_eq!(items[0]["unit_symbol"], "ml");
    assert_eq!(items[0]["store_section"], "Dairy");
    assert_eq!(items[1]["name"], "Flour");
    assert_eq!(items[1]["quantity"], 4.0);
    assert_eq!(items[1]["unit_symbol"], "cup");
    assert_eq!(items[1]["notes"], "Pancakes");
    assert_eq!(items[1]["consolidation"], "consolidated");

    let id = list["id"].as_str().unwrap();
    let (status, found) = send(
        &app,
        request("GET", &format!("/api/shopping-lists/{id}"), Some(TENANT), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, list);

    let (status, active) = send(
        &app,
        request(
            "GET",
            &format!("/api/households/{HOUSEHOLD}/shopping-list"),
            Some(TENANT),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["id"], id);

    Ok(())
}

#[tokio::test]
async fn test_tenant_scoping_and_errors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let plan = helpers::pancake_plan(&state).await?;
    let app = homeplan::create_app(state);
    let uri = format!("/api/meal-plans/{plan}/shopping-list");

    let (status, body) = send(&app, request("POST", &uri, None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing x-tenant-id header");

    let (status, body) = send(&app, request("POST", &uri, Some("tenant-b"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("meal plan {plan} not found"));

    let (status, _) = send(
        &app,
        request("GET", "/api/shopping-lists/unknown", Some(TENANT), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            "GET",
            &format!("/api/households/{HOUSEHOLD}/shopping-list"),
            Some(TENANT),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_item_mutations_complete_and_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let plan = helpers::pancake_plan(&state).await?;
    let app = homeplan::create_app(state);

    let (_, list) = send(
        &app,
        request(
            "POST",
            &format!("/api/meal-plans/{plan}/shopping-list"),
            Some(TENANT),
            None,
        ),
    )
    .await;
    let id = list["id"].as_str().unwrap().to_owned();
    let milk = list["items"][0]["id"].as_str().unwrap().to_owned();
    let item_uri = format!("/api/shopping-lists/{id}/items/{milk}");

    let (status, _) = send(
        &app,
        request("PATCH", &item_uri, Some(TENANT), Some(json!({ "quantity": 0.0 }))),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, list) = send(
        &app,
        request(
            "PATCH",
            &item_uri,
            Some(TENANT),
            Some(json!({ "quantity": 1000.0, "notes": "oat milk" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["items"][0]["quantity"], 1000.0);
    assert_eq!(list["items"][0]["notes"], "oat milk");

    let (status, list) = send(
        &app,
        request("POST", &format!("{item_uri}/toggle"), Some(TENANT), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["status"], "active");
    assert_eq!(list["items"][0]["id"], milk.as_str());
    assert_eq!(list["items"][0]["purchased"], true);

    let (status, list) = send(
        &app,
        request(
            "POST",
            &format!("/api/shopping-lists/{id}/complete"),
            Some(TENANT),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["status"], "completed");
    assert!(list["completed_at"].is_u64());

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/api/shopping-lists/{id}"), Some(TENANT), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/api/shopping-lists/{id}"), Some(TENANT), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
