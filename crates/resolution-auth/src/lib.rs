//! # resolution-auth
//!
//! Credential primitives for Resolution.
//!
//! ## Modules
//!
//! - `jwt`: bearer token creation and validation
//! - `password`: Argon2id hashing and the password policy
//! - `otp`: six-digit verification codes and their comparison

pub mod jwt;
pub mod otp;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use otp::{CodeGenerator, codes_match};
pub use password::{PasswordHasher, PasswordValidator};
