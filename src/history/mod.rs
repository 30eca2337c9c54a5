// src/history/mod.rs
mod store;

pub use store::{trim_to_recent, HistoryError, HistoryStore, StatusEntry, HISTORY_LIMIT};
