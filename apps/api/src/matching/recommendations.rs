use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::matching::recency::posted_label;
use crate::matching::scorer::{MatchScorer, SkillOverlapScorer};
use crate::models::job::{CandidateProfile, JobPosting};

/// A job posting plus the fields derived for one candidate at one point in time.
/// Serializes flat: the posting's own fields sit next to the derived ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobPosting,
    pub match_score: u32,
    pub posted: String,
    pub remote: bool,
    pub matching_skills: BTreeSet<String>,
}

pub fn is_remote(location: &str) -> bool {
    location.to_lowercase().contains("remote")
}

/// Scores every job with the default skill-overlap scorer and sorts best first.
/// Handlers call `build_with` with the configured `AppState::scorer`.
#[cfg_attr(not(test), allow(dead_code))]
pub fn build(jobs: &[JobPosting], candidate: &CandidateProfile, now: DateTime<Utc>) -> Vec<ScoredJob> {
    build_with(&SkillOverlapScorer, jobs, candidate, now)
}

/// Same as `build`, with an explicit scorer backend.
///
/// Output is sorted by descending `match_score`; ties keep input order.
pub fn build_with(
    scorer: &dyn MatchScorer,
    jobs: &[JobPosting],
    candidate: &CandidateProfile,
    now: DateTime<Utc>,
) -> Vec<ScoredJob> {
    let mut scored: Vec<ScoredJob> = jobs
        .iter()
        .map(|job| {
            let skill_match = scorer.score(&job.skills, &candidate.skills);
            ScoredJob {
                match_score: skill_match.score,
                posted: posted_label(job.created_at, now),
                remote: is_remote(&job.location),
                matching_skills: skill_match.matching_skills,
                job: job.clone(),
            }
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    debug!(
        "Built {} recommendations with scorer={}",
        scored.len(),
        scorer.backend()
    );
    scored
}
