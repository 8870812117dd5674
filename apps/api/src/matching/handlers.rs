//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::filter::{count_buckets, FilterCounts, RecommendationFilter};
use crate::matching::recommendations::{build_with, ScoredJob};
use crate::models::envelope::ApiResponse;
use crate::models::job::{CandidateProfile, JobPosting};
use crate::state::AppState;

/// Upper bound on jobs accepted by the score endpoint in one request.
const MAX_SCORE_BATCH: usize = 1000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: RecommendationFilter,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsQuery {
    #[serde(default)]
    pub filter: RecommendationFilter,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    #[serde(default)]
    pub candidate: CandidateProfile,
    /// Reference time for recency labels; defaults to the server clock.
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsData {
    pub filter: RecommendationFilter,
    pub recommendations: Vec<ScoredJob>,
    pub counts: FilterCounts,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations/score
///
/// Scores caller-supplied jobs against a caller-supplied profile. No upstream calls.
pub async fn handle_score(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ApiResponse<RecommendationsData>>, AppError> {
    if request.jobs.len() > MAX_SCORE_BATCH {
        return Err(AppError::Validation(format!(
            "at most {MAX_SCORE_BATCH} jobs can be scored per request"
        )));
    }

    let now = request.now.unwrap_or_else(Utc::now);
    let data = recommend(&state, &request.jobs, &request.candidate, query.filter, now);
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/v1/recommendations
///
/// Loads the caller's profile and the job list from the job board, then scores them.
/// The caller's `Authorization` header is forwarded as-is.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<ApiResponse<RecommendationsData>>, AppError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::Unauthorized)?;

    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (candidate, jobs) = tokio::try_join!(
        state.job_board.fetch_profile(authorization),
        state.job_board.fetch_jobs(authorization, search),
    )?;

    let data = recommend(&state, &jobs, &candidate, query.filter, Utc::now());
    info!(
        "Served {} of {} recommendations (filter={:?})",
        data.recommendations.len(),
        data.counts.all,
        data.filter
    );
    Ok(Json(ApiResponse::ok(data)))
}

fn recommend(
    state: &AppState,
    jobs: &[JobPosting],
    candidate: &CandidateProfile,
    filter: RecommendationFilter,
    now: DateTime<Utc>,
) -> RecommendationsData {
    let options = state.config.filter_options();
    let scored = build_with(state.scorer.as_ref(), jobs, candidate, now);
    let counts = count_buckets(&scored, &options, now);

    RecommendationsData {
        filter,
        recommendations: filter.apply(scored, &options, now),
        counts,
        scorer_backend: state.scorer.backend().to_string(),
    }
}
