//! Stage-gated advising backend for study-abroad planning.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
