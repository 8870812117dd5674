// Job recommendations: skill normalization, match scoring, recency labels,
// the recommendation builder and the tab filters on top of it.
// Pure and synchronous apart from the HTTP handlers.

pub mod filter;
pub mod handlers;
pub mod normalizer;
pub mod recency;
pub mod recommendations;
pub mod scorer;
