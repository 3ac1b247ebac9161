//! Password policy enforcement for new passwords.

use resolution_core::config::AuthConfig;
use resolution_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    min_score: u8,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: config.password_min_score.min(4),
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns the first violation found. `user_inputs` (name, email) are
    /// penalized by the strength estimator.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Password cannot be entirely numeric"));
        }

        if self.min_score > 0 {
            let estimate = zxcvbn::zxcvbn(password, user_inputs);
            if score_value(estimate.score()) < self.min_score {
                return Err(AppError::validation(
                    "Password is too weak. Please use a longer or less predictable password.",
                ));
            }
        }

        Ok(())
    }
}

fn score_value(score: zxcvbn::Score) -> u8 {
    match score {
        zxcvbn::Score::Zero => 0,
        zxcvbn::Score::One => 1,
        zxcvbn::Score::Two => 2,
        zxcvbn::Score::Three => 3,
        _ => 4,
    }
}
