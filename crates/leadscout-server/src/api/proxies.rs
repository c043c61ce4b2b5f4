//! Proxy administration surface consumed by the operator CLI.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use leadscout_core::ProxySpec;
use leadscout_fetch::{FetchError, PoolHealth, ProxySummary};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct AddedProxy {
    id: Uuid,
}

#[derive(Debug, Serialize)]
pub(super) struct ResetData {
    reset: usize,
}

pub(super) async fn list_proxies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ProxySummary>>> {
    let proxies = state.fetch.pool().list().await;
    Json(ApiResponse {
        data: proxies,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn pool_health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<PoolHealth>> {
    let health = state.fetch.pool().health().await;
    Json(ApiResponse {
        data: health,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn add_proxy(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(spec): Json<ProxySpec>,
) -> Result<Json<ApiResponse<AddedProxy>>, ApiError> {
    if spec.host.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "proxy host must be non-empty",
        ));
    }
    if spec.port == 0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "proxy port must be non-zero",
        ));
    }

    match state.fetch.pool().add(spec).await {
        Ok(id) => Ok(Json(ApiResponse {
            data: AddedProxy { id },
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(err @ FetchError::InvalidProxy { .. }) => {
            Err(ApiError::new(req_id.0, "conflict", err.to_string()))
        }
        Err(err) => Err(ApiError::new(req_id.0, "internal_error", err.to_string())),
    }
}

pub(super) async fn remove_proxy(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProxySummary>>, ApiError> {
    // Snapshot before removal so the response can echo what was dropped.
    let summary = state
        .fetch
        .pool()
        .list()
        .await
        .into_iter()
        .find(|p| p.id == id);

    match summary {
        Some(summary) if state.fetch.pool().remove(id).await => Ok(Json(ApiResponse {
            data: summary,
            meta: ResponseMeta::new(req_id.0),
        })),
        _ => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no proxy with id {id}"),
        )),
    }
}

pub(super) async fn check_proxies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ProxySummary>>> {
    let proxies = state.fetch.check_health(&state.probe_url).await;
    Json(ApiResponse {
        data: proxies,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn reset_proxies(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ResetData>> {
    let reset = state.fetch.pool().reset_blocked().await;
    Json(ApiResponse {
        data: ResetData { reset },
        meta: ResponseMeta::new(req_id.0),
    })
}
