use axum::{extract::State, Extension, Json};

use leadscout_core::LeadRecord;
use leadscout_validate::{BatchOutcome, ValidationResult};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// Upper bound on one batch request; larger submissions should be chunked
/// by the caller.
const MAX_BATCH_SIZE: usize = 1_000;

pub(super) async fn validate_lead(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(lead): Json<LeadRecord>,
) -> Json<ApiResponse<ValidationResult>> {
    let result = state.validator.validate(&lead);
    Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn validate_batch(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(leads): Json<Vec<LeadRecord>>,
) -> Result<Json<ApiResponse<BatchOutcome>>, ApiError> {
    if leads.len() > MAX_BATCH_SIZE {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!(
                "batch of {} exceeds the maximum of {MAX_BATCH_SIZE}",
                leads.len()
            ),
        ));
    }

    let outcome = state.validator.batch_validate(&leads);
    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}
