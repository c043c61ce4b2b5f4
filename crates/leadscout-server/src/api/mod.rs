mod leads;
mod proxies;
mod search;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use leadscout_fetch::FetchClient;
use leadscout_pipeline::LeadSearch;
use leadscout_validate::LeadValidator;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<LeadSearch>,
    pub validator: Arc<LeadValidator>,
    pub fetch: Arc<FetchClient>,
    pub probe_url: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    proxies_active: usize,
    proxies_total: usize,
    adapters: Vec<String>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "no_adapters" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/search", post(search::run_search))
        .route("/api/v1/leads/validate", post(leads::validate_lead))
        .route(
            "/api/v1/leads/validate-batch",
            post(leads::validate_batch),
        )
        .route(
            "/api/v1/proxies",
            get(proxies::list_proxies).post(proxies::add_proxy),
        )
        .route("/api/v1/proxies/{id}", axum::routing::delete(proxies::remove_proxy))
        .route("/api/v1/proxies/health", get(proxies::pool_health))
        .route("/api/v1/proxies/check", post(proxies::check_proxies))
        .route("/api/v1/proxies/reset", post(proxies::reset_proxies))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let pool = state.fetch.pool().health().await;

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                proxies_active: pool.active,
                proxies_total: pool.total,
                adapters: state.search.adapter_names(),
            },
            meta,
        }),
    )
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use leadscout_fetch::ProxyPool;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let pool = Arc::new(ProxyPool::new(3));
        let fetch = Arc::new(FetchClient::new(Arc::clone(&pool), 5, 0, 0, 0));
        AppState {
            search: Arc::new(LeadSearch::new(Vec::new(), 4)),
            validator: Arc::new(LeadValidator::with_builtin_reference()),
            fetch,
            probe_url: "https://example.com/".to_owned(),
        }
    }

    fn test_app() -> Router {
        let auth = AuthState::from_env(true).expect("auth");
        build_app(test_state(), auth, default_rate_limit_state())
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_no_adapters_maps_to_service_unavailable() {
        let response = ApiError::new("req-1", "no_adapters", "nothing configured").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn health_reports_pool_and_adapters() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
        assert_eq!(json["data"]["proxies_total"].as_u64(), Some(0));
    }

    #[tokio::test]
    async fn blank_search_query_is_a_bad_request() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query": "  "}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_without_adapters_is_service_unavailable() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query": "plumber"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn validate_endpoint_scores_a_lead() {
        let body = r#"{
            "name": "John Smith",
            "job_title": "CEO",
            "phone_number": "(212) 555-0100",
            "email": "john.smith@gmail.com",
            "address": "123 Main Street, New York, NY 10001"
        }"#;
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/leads/validate")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(json["data"]["is_valid"].as_bool(), Some(true));
    }

    #[tokio::test]
    async fn proxy_lifecycle_over_the_api() {
        let app = test_app();

        let add = Request::builder()
            .method("POST")
            .uri("/api/v1/proxies")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"host": "10.0.0.1", "port": 8080, "scheme": "http"}"#,
            ))
            .expect("request");
        let response = app.clone().oneshot(add).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        let id = json["data"]["id"].as_str().expect("id").to_owned();

        let list = Request::builder()
            .uri("/api/v1/proxies")
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(list).await.expect("response");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(json["data"].as_array().map(Vec::len), Some(1));

        let remove = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/proxies/{id}"))
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(remove).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let remove_again = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/proxies/{id}"))
            .body(Body::empty())
            .expect("request");
        let response = app.oneshot(remove_again).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_proxy_add_conflicts() {
        let app = test_app();
        let body = r#"{"host": "10.0.0.1", "port": 8080, "scheme": "http"}"#;

        let first = Request::builder()
            .method("POST")
            .uri("/api/v1/proxies")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("request");
        assert_eq!(
            app.clone().oneshot(first).await.expect("response").status(),
            StatusCode::OK
        );

        let second = Request::builder()
            .method("POST")
            .uri("/api/v1/proxies")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("request");
        assert_eq!(
            app.oneshot(second).await.expect("response").status(),
            StatusCode::CONFLICT
        );
    }
}
