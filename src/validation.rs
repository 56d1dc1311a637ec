use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::SignUpData;

pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Per-field validation messages for the sign-up form, serialized so a
/// client can render each one next to its input.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

pub fn validate_sign_up(data: &SignUpData) -> Result<(), FieldErrors> {
    let errors = FieldErrors {
        username: validate_username(&data.username).err(),
        email: validate_email(&data.email).err(),
        password: validate_password(&data.password).err(),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < 2 {
        return Err(String::from("username must be at least 2 characters"));
    }

    if username.len() > 20 {
        return Err(String::from("username must be no more than 20 characters"));
    }

    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(String::from(
            "username must not contain special characters",
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(String::from("invalid email address"))
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let min_length = 8;
    let digit_regex = Regex::new(r"\d").unwrap();
    let uppercase_regex = Regex::new(r"[A-Z]").unwrap();
    let lowercase_regex = Regex::new(r"[a-z]").unwrap();
    let special_char_regex = Regex::new(r"[!@#$%^&*()\-=+?]").unwrap();

    if password.len() < min_length {
        return Err(format!("password must be at least {} chars long", min_length));
    }

    if !digit_regex.is_match(password) {
        return Err(String::from("password must contain at least one digit."));
    }

    if !uppercase_regex.is_match(password) {
        return Err(String::from("password must contain at least one uppercase letter."));
    }

    if !lowercase_regex.is_match(password) {
        return Err(String::from("password must contain at least one lowercase letter."));
    }

    if !special_char_regex.is_match(password) {
        return Err(String::from("password must contain at least one special character. allowed special characters: !@#$%^&*()-_=+?"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_data() -> SignUpData {
        SignUpData {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Sup3rSecret!".to_string(),
        }
    }

    #[test]
    fn accepts_valid_sign_up_data() {
        assert_eq!(validate_sign_up(&valid_data()), Ok(()));
    }

    #[test]
    fn rejects_short_username() {
        assert!(validate_username("a").is_err());
    }

    #[test]
    fn rejects_username_with_spaces() {
        assert!(validate_username("al ice").is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(validate_email("alice@nowhere").is_err());
        assert!(validate_email("not an email").is_err());
        assert!(validate_email("alice@example.com").is_ok());
    }

    #[test]
    fn short_password_fails_on_its_own_field() {
        let mut data = valid_data();
        data.password = "Ab1!".to_string();

        let errors = validate_sign_up(&data).unwrap_err();
        assert!(errors.password.is_some());
        assert!(errors.username.is_none());
        assert!(errors.email.is_none());
    }

    #[test]
    fn password_requires_each_character_class() {
        assert!(validate_password("alllowercase1!").is_err());
        assert!(validate_password("ALLUPPERCASE1!").is_err());
        assert!(validate_password("NoDigitsHere!").is_err());
        assert!(validate_password("NoSpecials123").is_err());
        assert!(validate_password("Passw0rd!").is_ok());
    }

    #[test]
    fn collects_errors_for_every_bad_field() {
        let data = SignUpData {
            username: "x".to_string(),
            email: "bad".to_string(),
            password: "short".to_string(),
        };

        let errors = validate_sign_up(&data).unwrap_err();
        assert!(errors.username.is_some());
        assert!(errors.email.is_some());
        assert!(errors.password.is_some());
    }
}
