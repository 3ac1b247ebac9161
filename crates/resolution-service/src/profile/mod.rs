//! Profile management.

pub mod service;

pub use service::{ProfileService, UpdateProfileInput, UpsertProfileInput};
