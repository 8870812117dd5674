pub mod envelope;
pub mod job;
