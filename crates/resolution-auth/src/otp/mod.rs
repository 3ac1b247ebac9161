//! Six-digit one-time verification codes.

use rand::Rng;
use subtle::ConstantTimeEq;

/// Number of digits in a verification code.
pub const CODE_LENGTH: usize = 6;

/// Produces uniformly random numeric codes, leading zeros included.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator;

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// A fresh code such as `"004271"`.
    pub fn generate(&self) -> String {
        let value: u32 = rand::rng().random_range(0..1_000_000);
        format!("{value:06}")
    }
}

/// Compare a submitted code with the stored one in constant time.
pub fn codes_match(submitted: &str, stored: &str) -> bool {
    let submitted = submitted.trim();
    submitted.len() == CODE_LENGTH && bool::from(submitted.as_bytes().ct_eq(stored.as_bytes()))
}
