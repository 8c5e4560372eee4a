//! Password policy enforcement for new passwords.

use itqan_core::config::auth::AuthConfig;
use itqan_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
    /// Minimum zxcvbn score (0-4).
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
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let min_score = match self.min_score {
            0 => zxcvbn::Score::Zero,
            1 => zxcvbn::Score::One,
            2 => zxcvbn::Score::Two,
            3 => zxcvbn::Score::Three,
            _ => zxcvbn::Score::Four,
        };

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < min_score {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_validator() -> PasswordValidator {
        PasswordValidator {
            min_length: 8,
            min_score: 2,
        }
    }

    #[test]
    fn test_rejects_short_passwords() {
        let validator = make_validator();
        assert!(validator.validate("abc").is_err());
    }

    #[test]
    fn test_rejects_weak_passwords() {
        let validator = make_validator();
        assert!(validator.validate("password").is_err());
    }

    #[test]
    fn test_accepts_strong_passwords() {
        let validator = make_validator();
        assert!(validator.validate("tr4ctor-beam-ostrich!").is_ok());
    }
}
