//! Analytics query handler
//!
//! The one read-only operation of the service. Fetches the cohort (or
//! falls back to synthetic data), runs the pipeline on the blocking pool
//! and serves the final records. Diagnostics stay in the log; the caller
//! only ever sees students plus a status.

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::logic::{pipeline, PipelineOutcome, DEFAULT_SEED};
use crate::models::AnalyticsResponse;
use crate::{AppError, AppResult, AppState};

pub async fn get_analytics(State(state): State<AppState>) -> AppResult<Json<AnalyticsResponse>> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, source = state.source.describe(), "analytics query received");

    let fetched = state.source.fetch_students().await;
    let (cohort, origin) = pipeline::resolve_cohort(
        fetched,
        state.config.synthetic_cohort_size,
        state.config.max_cohort,
    );
    let cohort_size = cohort.len();

    // CPU-bound: clustering restarts and ensemble training must not stall
    // the async runtime
    let outcome = tokio::task::spawn_blocking(move || pipeline::run(cohort, DEFAULT_SEED))
        .await
        .map_err(|e| AppError::InternalError(format!("analytics worker failed: {e}")))?;

    let response = match outcome {
        PipelineOutcome::Success(students) => {
            tracing::info!(%request_id, %origin, cohort_size, "analytics computed");
            AnalyticsResponse::success(students.into_iter().map(Into::into).collect())
        }
        PipelineOutcome::InsufficientData => {
            tracing::info!(%request_id, %origin, cohort_size, "insufficient data for analytics");
            AnalyticsResponse::insufficient_data()
        }
    };

    Ok(Json(response))
}

// ============================================================================
// TESTS
// ============================================================================
