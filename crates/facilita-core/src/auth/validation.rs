//! Input validation for login and signup forms.

use crate::error::{FacilitaError, Result};
use crate::user::UserRole;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+\.\S+").unwrap_or_else(|e| panic!("invalid email pattern: {e}"))
});

/// Number of digits in a Brazilian mobile number with area code.
pub const PHONE_DIGITS: usize = 11;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Basic `something@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats an 11-digit phone number as `(DD) DDDDD-DDDD`.
///
/// Inputs that do not contain exactly 11 digits are returned unchanged.
pub fn format_phone(value: &str) -> String {
    let digits = digits(value);
    if digits.len() != PHONE_DIGITS {
        return value.to_string();
    }
    format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
}

/// Email and password as typed on the login screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Rejects empty fields and malformed email addresses.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(FacilitaError::validation("email and password are required"));
        }
        if !is_valid_email(&self.email) {
            return Err(FacilitaError::validation(format!(
                "invalid email: {}",
                self.email
            )));
        }
        Ok(())
    }
}

/// The signup form. `role` is `None` until the user picks an account type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<UserRole>,
    pub accept_terms: bool,
}

impl SignupForm {
    /// Checks the form field by field and reports the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FacilitaError::validation("full name is required"));
        }
        if !is_valid_email(&self.email) {
            return Err(FacilitaError::validation(format!(
                "invalid email: {}",
                self.email
            )));
        }
        if digits(&self.phone).len() != PHONE_DIGITS {
            return Err(FacilitaError::validation(format!(
                "phone must have {} digits",
                PHONE_DIGITS
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FacilitaError::validation(format!(
                "password must have at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.password != self.confirm_password {
            return Err(FacilitaError::validation("passwords do not match"));
        }
        if self.role.is_none() {
            return Err(FacilitaError::validation("select an account type"));
        }
        if !self.accept_terms {
            return Err(FacilitaError::validation("the terms of use must be accepted"));
        }
        Ok(())
    }

    /// Login credentials carried by a valid form.
    pub fn credentials(&self) -> Result<Credentials> {
        let role = self
            .role
            .ok_or_else(|| FacilitaError::validation("select an account type"))?;
        Ok(Credentials::new(&self.email, &self.password, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            phone: "(11) 98765-4321".to_string(),
            password: "segredo".to_string(),
            confirm_password: "segredo".to_string(),
            role: Some(UserRole::Customer),
            accept_terms: true,
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("(11) 98765-4321"), "(11) 98765-4321");
        assert_eq!(format_phone("1234"), "1234");
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("a@b.com", "x", UserRole::Customer).validate().is_ok());
        assert!(Credentials::new("", "x", UserRole::Customer).validate().is_err());
        assert!(Credentials::new("a@b.com", "", UserRole::Customer).validate().is_err());
        assert!(Credentials::new("nope", "x", UserRole::Customer).validate().is_err());
    }

    #[test]
    fn test_signup_form_valid() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_signup_form_rejections() {
        let cases: Vec<(&str, Box<dyn Fn(&mut SignupForm)>)> = vec![
            ("name", Box::new(|f| f.name = "  ".to_string())),
            ("email", Box::new(|f| f.email = "maria".to_string())),
            ("phone", Box::new(|f| f.phone = "1198765".to_string())),
            ("password", Box::new(|f| {
                f.password = "abc".to_string();
                f.confirm_password = "abc".to_string();
            })),
            ("confirm", Box::new(|f| f.confirm_password = "outro123".to_string())),
            ("role", Box::new(|f| f.role = None)),
            ("terms", Box::new(|f| f.accept_terms = false)),
        ];

        for (label, mutate) in cases {
            let mut form = valid_form();
            mutate(&mut form);
            let err = form.validate().unwrap_err();
            assert!(err.is_validation(), "case {label} should fail validation");
        }
    }
}
