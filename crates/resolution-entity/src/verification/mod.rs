//! Email verification code entities.

pub mod model;

pub use model::{CreateVerificationCode, VerificationCode};
