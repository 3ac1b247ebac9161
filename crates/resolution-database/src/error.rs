//! Mapping of storage failures onto [`AppError`].

use resolution_core::error::{AppError, ErrorKind};

/// Message returned when a registration reuses an email.
pub const EMAIL_TAKEN: &str = "A user with this email already exists";
/// Message returned when a registration reuses a phone number.
pub const PHONE_TAKEN: &str = "A user with this phone number already exists";

/// Translate a violated unique constraint into a conflict error.
pub fn conflict_for_constraint(constraint: &str) -> Option<AppError> {
    match constraint {
        "users_email_key" => Some(AppError::conflict(EMAIL_TAKEN)),
        "users_phone_key" => Some(AppError::conflict(PHONE_TAKEN)),
        "profiles_user_id_key" => Some(AppError::conflict("This user already has a profile")),
        "verification_codes_user_id_key" => Some(AppError::conflict(
            "A verification code already exists for this user",
        )),
        _ => None,
    }
}

/// Wrap a sqlx error, turning known unique violations into conflicts.
pub fn map_sqlx(context: &'static str, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(conflict) = db_err.constraint().and_then(conflict_for_constraint) {
            return conflict;
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(format!("{context}: referenced record does not exist"));
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}
