//! Account self-service and admin user management.

pub mod admin;
pub mod service;

pub use admin::AdminUserService;
pub use service::{LoginOutcome, RegisterUser, Registration, UpdateUserInput, UserService};

/// Canonical form of an email address: trimmed and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trimmed phone number, with blanks meaning "no phone".
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    phone
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
}
