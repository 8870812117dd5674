use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::recommendations::ScoredJob;

pub const DEFAULT_HIGH_MATCH_THRESHOLD: u32 = 80;
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 7;

/// Tabs of the recommendations view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationFilter {
    #[default]
    All,
    HighMatch,
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Minimum `match_score` for the high-match tab.
    pub high_match_threshold: u32,
    /// Maximum posting age for the recent tab.
    pub recent_window: Duration,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            high_match_threshold: DEFAULT_HIGH_MATCH_THRESHOLD,
            recent_window: Duration::days(i64::from(DEFAULT_RECENT_WINDOW_DAYS)),
        }
    }
}

/// Bucket sizes, used for tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCounts {
    pub all: usize,
    pub high_match: usize,
    pub recent: usize,
}

impl RecommendationFilter {
    pub fn matches(&self, job: &ScoredJob, options: &FilterOptions, now: DateTime<Utc>) -> bool {
        match self {
            RecommendationFilter::All => true,
            RecommendationFilter::HighMatch => job.match_score >= options.high_match_threshold,
            // Undated postings never count as recent; future-dated ones do.
            RecommendationFilter::Recent => job
                .job
                .created_at
                .map(|ts| now - ts <= options.recent_window)
                .unwrap_or(false),
        }
    }

    /// Keeps the matching jobs in their existing order.
    pub fn apply(
        &self,
        jobs: Vec<ScoredJob>,
        options: &FilterOptions,
        now: DateTime<Utc>,
    ) -> Vec<ScoredJob> {
        jobs.into_iter()
            .filter(|job| self.matches(job, options, now))
            .collect()
    }
}

pub fn count_buckets(jobs: &[ScoredJob], options: &FilterOptions, now: DateTime<Utc>) -> FilterCounts {
    let count = |filter: RecommendationFilter| {
        jobs.iter()
            .filter(|job| filter.matches(job, options, now))
            .count()
    };

    FilterCounts {
        all: jobs.len(),
        high_match: count(RecommendationFilter::HighMatch),
        recent: count(RecommendationFilter::Recent),
    }
}
