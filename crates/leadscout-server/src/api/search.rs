use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use leadscout_core::BusinessRecord;
use leadscout_pipeline::{PipelineError, SearchOptions};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    query: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    /// Keep every extracted contact instead of narrowing to the primary one.
    #[serde(default)]
    include_all_contacts: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    businesses: Vec<BusinessRecord>,
    sources: Vec<String>,
    skipped_duplicates: usize,
}

pub(super) async fn run_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let options = SearchOptions {
        optimize_contacts: !body.include_all_contacts,
        limit: body.limit,
    };

    match state
        .search
        .search(&body.query, body.location.as_deref(), &options)
        .await
    {
        Ok(outcome) => Ok(Json(ApiResponse {
            data: SearchData {
                businesses: outcome.businesses,
                sources: outcome.sources,
                skipped_duplicates: outcome.skipped_duplicates.len(),
            },
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(err @ PipelineError::InvalidQuery(_)) => {
            Err(ApiError::new(req_id.0, "validation_error", err.to_string()))
        }
        Err(err @ PipelineError::NoAdapters) => {
            Err(ApiError::new(req_id.0, "no_adapters", err.to_string()))
        }
    }
}
