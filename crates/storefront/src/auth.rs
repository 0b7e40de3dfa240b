//! Login and registration forms with client-side validation.
//!
//! Validation runs before any network call; a failing form surfaces a
//! warning and the backend is never contacted. The messages are part of
//! the user-facing contract and match the backend's own rules.

use thiserror::Error;

/// Minimum length for usernames and passwords at registration.
const MIN_CREDENTIAL_LENGTH: usize = 6;

/// A form value the user must fix before the backend is contacted.
///
/// The `Display` text is surfaced verbatim as a warning notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username is a required field")]
    UsernameRequired,
    #[error("Username must be at least 6 characters")]
    UsernameTooShort,
    #[error("Password is a required field")]
    PasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Values entered on the login screen.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Check the form before posting it.
    ///
    /// Login only requires both fields to be present; length rules apply
    /// at registration time.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if self.password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        Ok(())
    }
}

/// Values entered on the registration screen.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Check the form before posting it.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in field order: username presence
    /// and length, password presence and length, then the confirmation
    /// match.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if self.username.len() < MIN_CREDENTIAL_LENGTH {
            return Err(ValidationError::UsernameTooShort);
        }
        if self.password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        if self.password.len() < MIN_CREDENTIAL_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form(username: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm::default();
        assert_eq!(form.validate(), Err(ValidationError::UsernameRequired));

        let form = LoginForm {
            username: "criodo".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordRequired));

        let form = LoginForm {
            username: "criodo".to_string(),
            password: "pw".to_string(),
        };
        // Login imposes no length rules
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_register_rules_in_field_order() {
        assert_eq!(
            register_form("", "secret1", "secret1").validate(),
            Err(ValidationError::UsernameRequired)
        );
        assert_eq!(
            register_form("bob", "secret1", "secret1").validate(),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(
            register_form("criodo", "", "").validate(),
            Err(ValidationError::PasswordRequired)
        );
        assert_eq!(
            register_form("criodo", "abc", "abc").validate(),
            Err(ValidationError::PasswordTooShort)
        );
        // Boundary: five characters are rejected as too short even when
        // the confirmation matches, six are accepted
        assert_eq!(
            register_form("criodo", "fiver", "fiver").validate(),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(register_form("criodo", "sixsix", "sixsix").validate(), Ok(()));
        assert_eq!(
            register_form("criodo", "secret1", "secret2").validate(),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(register_form("criodo", "secret1", "secret1").validate(), Ok(()));
    }

    #[test]
    fn test_validation_messages_are_the_user_contract() {
        assert_eq!(
            ValidationError::UsernameRequired.to_string(),
            "Username is a required field"
        );
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }
}
