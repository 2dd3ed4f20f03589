//! # Credentials
//!
//! Bugzilla accepts a login and password on any call through the `Bugzilla_login` and
//! `Bugzilla_password` parameters.
use crate::args::Params;
use std::fmt;

pub const LOGIN_KEY: &str = "Bugzilla_login";
pub const PASSWORD_KEY: &str = "Bugzilla_password";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Builds credentials only when both halves are present.
    pub fn from_parts(login: Option<String>, password: Option<String>) -> Option<Self> {
        match (login, password) {
            (Some(login), Some(password)) => Some(Self::new(login, password)),
            _ => None,
        }
    }

    fn is_complete(&self) -> bool {
        !self.login.is_empty() && !self.password.is_empty()
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Merges the login fields into `params`.
///
/// The fields are added only when both the login and the password are non-empty; partial
/// credentials leave `params` untouched.
pub fn inject(mut params: Params, credentials: Option<&Credentials>) -> Params {
    if let Some(credentials) = credentials.filter(|c| c.is_complete()) {
        params.insert(LOGIN_KEY.to_string(), credentials.login.clone().into());
        params.insert(PASSWORD_KEY.to_string(), credentials.password.clone().into());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> Params {
        let mut params = Params::new();
        params.insert("ids".into(), json!([1]));
        params
    }

    #[test]
    fn adds_exactly_two_fields_with_full_credentials() {
        let credentials = Credentials::new("tagoh@example.com", "secret");
        let injected = inject(params(), Some(&credentials));

        assert_eq!(injected.len(), params().len() + 2);
        assert_eq!(injected[LOGIN_KEY], json!("tagoh@example.com"));
        assert_eq!(injected[PASSWORD_KEY], json!("secret"));
        assert_eq!(injected["ids"], json!([1]));
    }

    #[test]
    fn partial_credentials_add_nothing() {
        for credentials in [
            Credentials::new("tagoh@example.com", ""),
            Credentials::new("", "secret"),
            Credentials::new("", ""),
        ] {
            assert_eq!(inject(params(), Some(&credentials)), params());
        }
        assert_eq!(inject(params(), None), params());
    }

    #[test]
    fn from_parts_requires_both_values() {
        assert!(Credentials::from_parts(Some("me".into()), None).is_none());
        assert!(Credentials::from_parts(None, Some("pw".into())).is_none());
        assert!(Credentials::from_parts(Some("me".into()), Some("pw".into())).is_some());
    }

    #[test]
    fn debug_output_hides_the_password() {
        let rendered = format!("{:?}", Credentials::new("me", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
