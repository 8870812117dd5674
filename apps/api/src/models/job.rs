use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A job posting as served by the Career Navigator REST API (`GET /api/jobs`).
///
/// Decoding never fails on an odd field: anything that isn't the expected shape
/// falls back to an empty value, so a sparse record still flows through scoring
/// as an empty-skills job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawJobPosting")]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Required skills in display order.
    pub skills: Vec<String>,
    pub description: String,
    pub salary: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Wire shape of a job record. Every field is taken as raw JSON and cleaned up in
/// `From<RawJobPosting>`. Mongoose documents with virtuals carry both `_id` and `id`.
#[derive(Deserialize)]
struct RawJobPosting {
    #[serde(rename = "_id", default)]
    mongo_id: Value,
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    company: Value,
    #[serde(default)]
    location: Value,
    #[serde(default)]
    skills: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    salary: Value,
    #[serde(rename = "createdAt", default)]
    created_at: Value,
}

impl From<RawJobPosting> for JobPosting {
    fn from(raw: RawJobPosting) -> Self {
        Self {
            id: text(raw.mongo_id).or_else(|| text(raw.id)).unwrap_or_default(),
            title: text(raw.title).unwrap_or_default(),
            company: text(raw.company).unwrap_or_default(),
            location: text(raw.location).unwrap_or_default(),
            skills: skill_list(raw.skills),
            description: text(raw.description).unwrap_or_default(),
            salary: text(raw.salary),
            created_at: timestamp(&raw.created_at),
        }
    }
}

/// The logged-in candidate's profile (`GET /api/auth/profile`). Only skills matter here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<String>,
}

fn lenient_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(skill_list(Value::deserialize(deserializer)?))
}

// Numbers become text (older postings store salary as a number); blanks are None.
fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Keeps the string entries of a skills array; anything else yields no skills.
fn skill_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// RFC 3339 strings, bare `YYYY-MM-DD` dates and epoch milliseconds.
fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                })
        }
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}
