//! HTTP surface tests driven through the router with tower's oneshot.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use common::test_pool;
use http_body_util::BodyExt;
use prosthesis_core::web::{build_router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const COMPANY: &str = "1";
const OTHER_COMPANY: &str = "2";

async fn test_app() -> (Router, TempDir) {
    let (pool, dir) = test_pool().await;
    let app = build_router(AppState::new(pool));
    (app, dir)
}

fn request(method: Method, uri: &str, company: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-company-id", company)
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn order_body() -> Value {
    json!({
        "patientId": 100,
        "professionalId": 200,
        "type": "Coroa",
        "description": "Coroa de cerâmica no dente 36",
        "laboratory": "Lab Sorriso",
        "labels": []
    })
}

#[tokio::test]
async fn missing_tenant_header_is_unauthorized() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/prosthesis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn create_returns_201_with_pending_status() {
    let (app, _dir) = test_app().await;

    let mut body = order_body();
    body["status"] = json!("archived");

    let response = app
        .oneshot(request(Method::POST, "/prosthesis", COMPANY, Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let order = json_body(response).await;
    assert_eq!(order["status"], "pending");
    assert_eq!(order["type"], "Coroa");
    assert!(order["sentDate"].is_null());
}

#[tokio::test]
async fn create_auto_registers_the_laboratory() {
    let (app, _dir) = test_app().await;

    app.clone()
        .oneshot(request(Method::POST, "/prosthesis", COMPANY, Some(order_body())))
        .await
        .unwrap();

    let response = app
        .oneshot(request(Method::GET, "/laboratories", COMPANY, None))
        .await
        .unwrap();
    let labs = json_body(response).await;
    assert_eq!(labs.as_array().unwrap().len(), 1);
    assert_eq!(labs[0]["name"], "Lab Sorriso");
}

#[tokio::test]
async fn legal_transition_applies_date_effects() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/prosthesis", COMPANY, Some(order_body())))
        .await
        .unwrap();
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/prosthesis/{id}"),
            COMPANY,
            Some(json!({"status": "sent", "expectedReturnDate": "2030-01-10"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order = json_body(response).await;
    assert_eq!(order["status"], "sent");
    assert!(!order["sentDate"].is_null());

    // Rolling back clears the shipment dates
    let response = app
        .oneshot(request(
            Method::PATCH,
            &format!("/prosthesis/{id}"),
            COMPANY,
            Some(json!({"status": "pending"})),
        ))
        .await
        .unwrap();
    let order = json_body(response).await;
    assert_eq!(order["status"], "pending");
    assert!(order["sentDate"].is_null());
    assert!(order["returnDate"].is_null());
}

#[tokio::test]
async fn illegal_transition_is_rejected_and_state_unchanged() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/prosthesis", COMPANY, Some(order_body())))
        .await
        .unwrap();
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/prosthesis/{id}"),
            COMPANY,
            Some(json!({"status": "completed"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_TRANSITION");

    let response = app
        .oneshot(request(Method::GET, "/prosthesis", COMPANY, None))
        .await
        .unwrap();
    let orders = json_body(response).await;
    assert_eq!(orders[0]["status"], "pending");
}

#[tokio::test]
async fn updates_outside_the_tenant_are_404() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/prosthesis", COMPANY, Some(order_body())))
        .await
        .unwrap();
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/prosthesis/{id}"),
            OTHER_COMPANY,
            Some(json!({"description": "hijack"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(request(
            Method::DELETE,
            &format!("/prosthesis/{id}"),
            OTHER_COMPANY,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_204() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/prosthesis", COMPANY, Some(order_body())))
        .await
        .unwrap();
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(Method::DELETE, &format!("/prosthesis/{id}"), COMPANY, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request(Method::GET, "/prosthesis", COMPANY, None))
        .await
        .unwrap();
    let orders = json_body(response).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_label_is_a_conflict() {
    let (app, _dir) = test_app().await;

    let label = json!({"name": "Alta Prioridade", "color": "#ff0000"});
    let response = app
        .clone()
        .oneshot(request(Method::POST, "/prosthesis/labels", COMPANY, Some(label)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["id"], "alta-prioridade");

    let duplicate = json!({"name": "ALTA prioridade", "color": "#00ff00"});
    let response = app
        .oneshot(request(
            Method::POST,
            "/prosthesis/labels",
            COMPANY,
            Some(duplicate),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn restore_defaults_endpoint_seeds_the_builtins() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/prosthesis/labels/restore-defaults",
            COMPANY,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let labels = json_body(response).await;
    assert_eq!(labels.as_array().unwrap().len(), 6);

    // Label catalogs are tenant-scoped too
    let response = app
        .oneshot(request(Method::GET, "/prosthesis/labels", OTHER_COMPANY, None))
        .await
        .unwrap();
    let labels = json_body(response).await;
    assert!(labels.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn laboratory_crud_round_trip() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/laboratories",
            COMPANY,
            Some(json!({"name": "Lab Sorriso", "phone": "11 99999-0000"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/laboratories/{id}"),
            COMPANY,
            Some(json!({"email": "contato@labsorriso.com"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let lab = json_body(response).await;
    assert_eq!(lab["email"], "contato@labsorriso.com");
    assert_eq!(lab["phone"], "11 99999-0000");

    let response = app
        .oneshot(request(
            Method::DELETE,
            &format!("/laboratories/{id}"),
            COMPANY,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
