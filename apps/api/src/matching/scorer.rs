//! Match scoring: pluggable, trait-based scorer that rates a candidate's skills
//! against one job's required skills.
//!
//! Default: `SkillOverlapScorer` (pure, deterministic, bounded to 50..=98).
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::matching::normalizer::{normalize_skill, skills_overlap};

/// Score given when nothing can be compared (no candidate skills, no overlap).
pub const BASE_SCORE: u32 = 50;
/// Full overlap saturates here rather than at 100.
pub const MAX_SCORE: u32 = 98;

/// Result of scoring one job for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillMatch {
    pub score: u32,
    /// Normalized candidate skills that overlap at least one job skill.
    pub matching_skills: BTreeSet<String>,
}

impl SkillMatch {
    fn base() -> Self {
        Self {
            score: BASE_SCORE,
            matching_skills: BTreeSet::new(),
        }
    }
}

/// Implement this to swap scoring backends without touching the builder or handlers.
pub trait MatchScorer: Send + Sync {
    fn score(&self, job_skills: &[String], candidate_skills: &[String]) -> SkillMatch;

    /// Short label surfaced in API responses.
    fn backend(&self) -> &'static str;
}

/// Skill-overlap scorer used by the recommendations view.
///
/// Algorithm:
/// 1. No candidate skills → 50.
/// 2. A candidate skill matches if it contains, or is contained in, some job skill
///    (case-insensitive). Each distinct matching skill counts once.
/// 3. percentage = matches / max(|job skills|, |candidate skills|) × 100
/// 4. score = round(min(50 + percentage / 2, 98))
pub struct SkillOverlapScorer;

impl MatchScorer for SkillOverlapScorer {
    fn score(&self, job_skills: &[String], candidate_skills: &[String]) -> SkillMatch {
        compute_skill_match(job_skills, candidate_skills)
    }

    fn backend(&self) -> &'static str {
        "skill_overlap"
    }
}

/// Integer match score for a job/candidate pair, always within `BASE_SCORE..=MAX_SCORE`.
/// Handlers score through the `MatchScorer` trait object instead.
#[cfg_attr(not(test), allow(dead_code))]
pub fn score(job_skills: &[String], candidate_skills: &[String]) -> u32 {
    compute_skill_match(job_skills, candidate_skills).score
}

pub fn compute_skill_match(job_skills: &[String], candidate_skills: &[String]) -> SkillMatch {
    if candidate_skills.is_empty() {
        return SkillMatch::base();
    }

    let job_normalized: Vec<String> = job_skills.iter().map(|s| normalize_skill(s)).collect();

    let matching_skills: BTreeSet<String> = candidate_skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|candidate| {
            job_normalized
                .iter()
                .any(|job_skill| skills_overlap(job_skill, candidate))
        })
        .collect();

    // candidate_skills is non-empty, so this is at least 1
    let denominator = job_skills.len().max(candidate_skills.len());
    let match_percentage = matching_skills.len() as f64 / denominator as f64 * 100.0;
    let raw_score = f64::from(BASE_SCORE) + match_percentage / 2.0;
    let score = raw_score.min(f64::from(MAX_SCORE)).round() as u32;

    SkillMatch {
        score,
        matching_skills,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
