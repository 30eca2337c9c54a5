// src/health/mod.rs
mod checker;
mod probe;

pub use checker::{RunSummary, StatusChecker};
pub use probe::{HttpProbe, ProbeOutcome};
