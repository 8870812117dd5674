use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::matching::filter::{FilterOptions, DEFAULT_HIGH_MATCH_THRESHOLD, DEFAULT_RECENT_WINDOW_DAYS};
use crate::matching::scorer::{BASE_SCORE, MAX_SCORE};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value is out of range.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Career Navigator REST API, e.g. `http://localhost:5000`.
    pub job_board_api_url: String,
    pub job_board_timeout_secs: u64,
    pub high_match_threshold: u32,
    pub recent_window_days: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let job_board_api_url = lookup("JOB_BOARD_API_URL")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'JOB_BOARD_API_URL' is not set")?;
        ensure!(
            job_board_api_url.starts_with("http://") || job_board_api_url.starts_with("https://"),
            "JOB_BOARD_API_URL must start with http:// or https://"
        );

        let config = Config {
            job_board_api_url,
            job_board_timeout_secs: parse_or(&lookup, "JOB_BOARD_TIMEOUT_SECS", 30)?,
            high_match_threshold: parse_or(
                &lookup,
                "HIGH_MATCH_THRESHOLD",
                DEFAULT_HIGH_MATCH_THRESHOLD,
            )?,
            recent_window_days: parse_or(&lookup, "RECENT_WINDOW_DAYS", DEFAULT_RECENT_WINDOW_DAYS)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        };

        ensure!(
            (BASE_SCORE..=MAX_SCORE).contains(&config.high_match_threshold),
            "HIGH_MATCH_THRESHOLD must be between {BASE_SCORE} and {MAX_SCORE}"
        );
        ensure!(
            (1..=3650).contains(&config.recent_window_days),
            "RECENT_WINDOW_DAYS must be between 1 and 3650"
        );
        ensure!(
            config.job_board_timeout_secs > 0,
            "JOB_BOARD_TIMEOUT_SECS must be positive"
        );

        Ok(config)
    }

    pub fn job_board_timeout(&self) -> Duration {
        Duration::from_secs(self.job_board_timeout_secs)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            high_match_threshold: self.high_match_threshold,
            recent_window: chrono::Duration::days(i64::from(self.recent_window_days)),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&[("JOB_BOARD_API_URL", "http://localhost:5000")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.job_board_timeout_secs, 30);
        assert_eq!(config.high_match_threshold, 80);
        assert_eq!(config.recent_window_days, 7);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.filter_options(), FilterOptions::default());
    }

    #[test]
    fn test_missing_api_url_fails() {
        let err = load(&[("PORT", "9000")]).unwrap_err();
        assert!(err.to_string().contains("JOB_BOARD_API_URL"));
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = load(&[
            ("JOB_BOARD_API_URL", "http://localhost:5000"),
            ("PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_threshold_out_of_range_fails() {
        assert!(load(&[
            ("JOB_BOARD_API_URL", "http://localhost:5000"),
            ("HIGH_MATCH_THRESHOLD", "99"),
        ])
        .is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("JOB_BOARD_API_URL", "https://jobs.example.com"),
            ("HIGH_MATCH_THRESHOLD", "90"),
            ("RECENT_WINDOW_DAYS", "14"),
            ("JOB_BOARD_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.high_match_threshold, 90);
        assert_eq!(config.job_board_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.filter_options().recent_window,
            chrono::Duration::days(14)
        );
    }
}
