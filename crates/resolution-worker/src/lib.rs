//! Scheduled maintenance for Resolution.
//!
//! This crate provides:
//! - A cron scheduler that owns the periodic tasks
//! - The task bodies, callable directly from tests and operator tooling

pub mod jobs;
pub mod scheduler;

pub use scheduler::CronScheduler;
