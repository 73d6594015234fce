//! HTTP router construction.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/v1/calculate", axum::routing::post(api::calculate))
        .route("/api/v1/expressions", get(api::list_expressions))
        .route("/api/v1/expressions/{id}", get(api::get_expression))
        .route(
            "/internal/task",
            get(api::get_task).post(api::post_task_result),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use distcalc_compute::Dispatcher;
    use distcalc_core::config::OperationTimes;

    fn app() -> Router {
        let dispatcher = Dispatcher::new(OperationTimes::uniform(0));
        build_router(Arc::new(AppState::new(dispatcher)))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn submit(app: &Router, expression: &str) -> String {
        let body = json!({ "expression": expression }).to_string();
        let (status, bytes) = send(app, post("/api/v1/calculate", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        json["id"].as_str().unwrap().to_string()
    }

    async fn poll(app: &Router) -> Option<Value> {
        let (status, bytes) = send(app, get_req("/internal/task")).await;
        match status {
            StatusCode::OK => Some(serde_json::from_slice::<Value>(&bytes).unwrap()["task"].clone()),
            StatusCode::NOT_FOUND => None,
            other => panic!("unexpected status {other}"),
        }
    }

    async fn report(app: &Router, id: &Value, result: Value) -> StatusCode {
        let body = json!({ "id": id, "result": result }).to_string();
        send(app, post("/internal/task", body)).await.0
    }

    #[tokio::test]
    async fn calculate_rejects_bad_input() {
        let app = app();
        for body in [
            r#"{"expression": "   "}"#,
            r#"{"expression": "2 +"}"#,
            r#"{"expression": "(2 + 3"}"#,
            r#"{"expr": "2 + 3"}"#,
            "not json",
        ] {
            let (status, _) = send(&app, post("/api/v1/calculate", body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        }
    }

    #[tokio::test]
    async fn full_round_trip_through_the_worker_protocol() {
        let app = app();
        let id = submit(&app, "2 + 3 * 4").await;

        let (status, bytes) = send(&app, get_req(&format!("/api/v1/expressions/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["expression"]["status"], "pending");

        let mul = poll(&app).await.unwrap();
        assert_eq!(mul["operation"], "*");
        assert_eq!(mul["operation_time"], 0);
        assert!(poll(&app).await.is_none());
        assert_eq!(report(&app, &mul["id"], json!(12.0)).await, StatusCode::OK);

        let add = poll(&app).await.unwrap();
        assert_eq!(add["arg1"], 2.0);
        assert_eq!(add["arg2"], 12.0);
        assert_eq!(report(&app, &add["id"], json!(14.0)).await, StatusCode::OK);

        let (_, bytes) = send(&app, get_req(&format!("/api/v1/expressions/{id}"))).await;
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["expression"]["status"], "completed");
        assert_eq!(json["expression"]["result"], 14.0);
    }

    #[tokio::test]
    async fn empty_queue_returns_not_found_message() {
        let app = app();
        let (status, bytes) = send(&app, get_req("/internal/task")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(bytes, b"No tasks available");
    }

    #[tokio::test]
    async fn result_reports_are_validated() {
        let app = app();
        submit(&app, "1 + 1").await;

        let unknown = report(&app, &json!("6b0f4b3c-2c39-4d57-9a55-8d0d3c7b1e11"), json!(2.0)).await;
        assert_eq!(unknown, StatusCode::NOT_FOUND);
        assert_eq!(report(&app, &json!("garbage"), json!(2.0)).await, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, post("/internal/task", r#"{"id": 5}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn infinite_results_survive_json() {
        let app = app();
        let id = submit(&app, "1 / 0").await;
        let task = poll(&app).await.unwrap();
        assert_eq!(report(&app, &task["id"], json!("Infinity")).await, StatusCode::OK);

        let (_, bytes) = send(&app, get_req(&format!("/api/v1/expressions/{id}"))).await;
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["expression"]["result"], "Infinity");
    }

    #[tokio::test]
    async fn list_and_lookup() {
        let app = app();
        let first = submit(&app, "1 + 2").await;
        let second = submit(&app, "5").await;

        let (status, bytes) = send(&app, get_req("/api/v1/expressions")).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        let list = json["expressions"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["id"], first.as_str());
        assert_eq!(list[1]["id"], second.as_str());
        assert_eq!(list[1]["status"], "completed");
        assert_eq!(list[1]["result"], 5.0);

        let (status, _) = send(&app, get_req("/api/v1/expressions/not-an-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(
            &app,
            get_req("/api/v1/expressions/6b0f4b3c-2c39-4d57-9a55-8d0d3c7b1e11"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_counters() {
        let app = app();
        submit(&app, "1 + 2").await;
        poll(&app).await;
        poll(&app).await;

        let (status, bytes) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["metrics"]["expressions_submitted"], 1);
        assert_eq!(json["metrics"]["tasks_claimed"], 1);
        assert_eq!(json["metrics"]["empty_polls"], 1);
    }
}
