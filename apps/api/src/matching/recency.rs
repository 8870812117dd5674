use chrono::{DateTime, Utc};

/// Label for anything younger than a minute (or dated in the future).
pub const JUST_NOW: &str = "Just now";
/// Label used when a posting carries no creation timestamp.
pub const UNKNOWN_AGE: &str = "Recently";

// Largest unit first; months and years are fixed 30/365-day spans.
const UNITS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Formats the age of `created_at` relative to `now`, e.g. "2 days ago".
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - created_at).num_seconds().max(0);

    for (unit, seconds) in UNITS {
        let count = elapsed / seconds;
        if count >= 1 {
            let plural = if count == 1 { "" } else { "s" };
            return format!("{count} {unit}{plural} ago");
        }
    }

    JUST_NOW.to_string()
}

/// `time_ago` with the "Recently" fallback for postings without a timestamp.
pub fn posted_label(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match created_at {
        Some(ts) => time_ago(ts, now),
        None => UNKNOWN_AGE.to_string(),
    }
}
