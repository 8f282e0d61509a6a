//! End-to-end tests against the assembled router.
//!
//! Requests go through the same router the binary serves, including the
//! tracing and fault recovery layers.

use average_service::api::{create_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_average(body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/average")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, bytes) = send(app(), request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_health(app: Router) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn average_of_two_four_six_is_four() {
    let (status, body) = post_average(r#"{"numbers":[2,4,6]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average"].as_f64(), Some(4.0));
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn average_follows_left_to_right_float_summation() {
    let numbers = [0.1, 0.2, 0.3];
    let expected = (0.1 + 0.2 + 0.3) / 3.0;

    let (status, body) = post_average(&json!({ "numbers": numbers }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average"].as_f64(), Some(expected));
}

#[tokio::test]
async fn empty_array_is_rejected() {
    let (status, body) = post_average(r#"{"numbers":[]}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "El arreglo debe tener al menos un número" })
    );
}

#[tokio::test]
async fn negative_element_is_a_constraint_violation() {
    let (status, body) = post_average(r#"{"numbers":[1,-2,3]}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Todos los números deben ser mayores que cero" })
    );
}

#[tokio::test]
async fn zero_element_is_a_constraint_violation() {
    let (status, body) = post_average(r#"{"numbers":[5,0]}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body.get("average").is_none());
}

#[tokio::test]
async fn overflowing_sum_never_returns_null_average() {
    let (status, body) = post_average(r#"{"numbers":[1e308,1e308]}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "error interno del servidor" }));
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    for body in [
        "{}",
        r#"{"numbers":"not-a-list"}"#,
        r#"{"numbers":[1,"two"]}"#,
        "not json at all",
        "",
    ] {
        let (status, json) = post_average(body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(
            json,
            json!({ "error": "JSON inválido o campo 'numbers' faltante" }),
            "body {body:?}"
        );
    }
}

#[tokio::test]
async fn content_type_is_not_required() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/average")
        .body(Body::from(r#"{"numbers":[3]}"#))
        .unwrap();

    let (status, bytes) = send(app(), request).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average"].as_f64(), Some(3.0));
}

#[tokio::test]
async fn health_is_unaffected_by_prior_requests() {
    let app = app();

    for body in [r#"{"numbers":[]}"#, "garbage", r#"{"numbers":[1,2]}"#] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/average")
            .body(Body::from(body))
            .unwrap();
        send(app.clone(), request).await;
    }

    let (status, body) = get_health(app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "healthy", "service": "average-service" })
    );
}

#[tokio::test]
async fn root_reports_readiness_as_text() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, bytes) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "El Servicio de Promedio está listo para producción"
    );
}

#[tokio::test]
async fn wrong_method_is_not_served() {
    let request = Request::builder()
        .uri("/api/v1/average")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
