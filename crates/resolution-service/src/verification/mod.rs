//! Email verification code lifecycle.

pub mod service;

pub use service::{IssuedCode, VerificationService};
