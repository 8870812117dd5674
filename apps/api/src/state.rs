use std::sync::Arc;

use crate::config::Config;
use crate::job_board::JobBoard;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Upstream source of jobs and candidate profiles.
    pub job_board: Arc<dyn JobBoard>,
    /// Pluggable match scorer. Default: SkillOverlapScorer.
    pub scorer: Arc<dyn MatchScorer>,
}
