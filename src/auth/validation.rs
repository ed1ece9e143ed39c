//! Sign-in / sign-up form validation.
//!
//! Errors are reported per field so the view can show each one next to its
//! input. They are never fatal.

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Catalog key for an invalid e-mail message.
pub const INVALID_EMAIL: &str = "console.auth.invalid_email";

/// Catalog key for a too-short password message.
pub const SHORT_PASSWORD: &str = "console.auth.short_password";

/// Field-scoped validation errors, as catalog keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    /// Non-empty field errors in display order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        [self.email, self.password].into_iter().flatten()
    }
}

/// Validate both credential fields.
///
/// # Errors
/// Returns the collected field errors if any field is invalid.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), FormErrors> {
    let errors = FormErrors {
        email: (!is_valid_email(email)).then_some(INVALID_EMAIL),
        password: (password.chars().count() < MIN_PASSWORD_LEN).then_some(SHORT_PASSWORD),
    };
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Syntactic e-mail check: `local@domain.tld`, no whitespace, no empty
/// domain labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.in"));
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plain",
            "@example.com",
            "a@",
            "a@example",
            "a@@example.com",
            "a b@example.com",
            "a@example..com",
            "a@-example.com",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_credentials_reports_each_field() {
        assert_eq!(validate_credentials("asha@example.com", "secret"), Ok(()));

        let errors = validate_credentials("nope", "12345").unwrap_err();
        assert_eq!(errors.email, Some(INVALID_EMAIL));
        assert_eq!(errors.password, Some(SHORT_PASSWORD));
        assert_eq!(errors.keys().count(), 2);

        let errors = validate_credentials("asha@example.com", "").unwrap_err();
        assert_eq!(errors.email, None);
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec![SHORT_PASSWORD]);
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Six Devanagari characters are more than six bytes but still six chars.
        assert!(validate_credentials("asha@example.com", "अआइईउऊ").is_ok());
    }
}
