/// Case-folds a skill for comparison. No trimming or other cleanup is applied.
pub fn normalize_skill(skill: &str) -> String {
    skill.to_lowercase()
}

/// Bidirectional containment test on two normalized skills:
/// "react" overlaps "react.js" and vice versa.
pub fn skills_overlap(job_skill: &str, candidate_skill: &str) -> bool {
    job_skill.contains(candidate_skill) || candidate_skill.contains(job_skill)
}
