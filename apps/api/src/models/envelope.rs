use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::job::JobPosting;

/// `{ success, data, message }` wrapper used by every Career Navigator endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` payload of `GET /api/jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobsPage {
    #[serde(default, deserialize_with = "skip_bad_jobs")]
    pub jobs: Vec<JobPosting>,
}

// One undecodable entry drops that entry, not the page.
fn skip_bad_jobs<'de, D>(deserializer: D) -> Result<Vec<JobPosting>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<JobPosting>(item) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!("Skipping undecodable job record: {e}");
                None
            }
        })
        .collect())
}

/// Success body returned by this service, shaped like the upstream envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
