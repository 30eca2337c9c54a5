// src/lib.rs
pub mod config;
pub mod health;
pub mod history;
pub mod notify;
pub mod runner;
