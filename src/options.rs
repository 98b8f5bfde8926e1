//! Client options and their validation.
//!
//! Two validation contracts exist side by side:
//! - [`ClientOptionsValidator`] checks a bound options record and reports every
//!   blank field at once.
//! - [`require_non_blank`] backs explicit-parameter construction and stops at
//!   the first blank argument.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Credentials and identifiers for the ConcreteGo API.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    pub username: String,
    pub password: String,
    pub app_id: String,
    pub app_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl ClientOptions {
    /// Configuration section the options are bound from
    pub const SECTION: &'static str = "ConcreteGoApi";

    /// Build options from explicit parameters, failing on the first blank one.
    pub fn from_parameters(
        username: &str,
        password: &str,
        app_id: &str,
        app_key: &str,
        slug: Option<&str>,
    ) -> Result<Self> {
        require_non_blank("username", "Username", username)?;
        require_non_blank("password", "Password", password)?;
        require_non_blank("appId", "AppId", app_id)?;
        require_non_blank("appKey", "AppKey", app_key)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
            slug: slug.map(str::to_string),
        })
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("app_id", &self.app_id)
            .field("app_key", &redacted(&self.app_key))
            .field("slug", &self.slug)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

/// Empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fail-fast check used by explicit-parameter construction.
pub fn require_non_blank(param: &'static str, field: &str, value: &str) -> Result<()> {
    if is_blank(value) {
        return Err(ClientError::InvalidArgument {
            param,
            message: format!("{field} cannot be null or empty"),
        });
    }
    Ok(())
}

/// Outcome of validating an options record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateOptionsResult {
    Success,
    Fail(Vec<String>),
}

impl ValidateOptionsResult {
    pub fn from_failures(failures: Vec<String>) -> Self {
        if failures.is_empty() {
            ValidateOptionsResult::Success
        } else {
            ValidateOptionsResult::Fail(failures)
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, ValidateOptionsResult::Success)
    }

    pub fn failures(&self) -> &[String] {
        match self {
            ValidateOptionsResult::Success => &[],
            ValidateOptionsResult::Fail(failures) => failures,
        }
    }
}

/// Validates a bound options record of type `T`.
pub trait ValidateOptions<T> {
    /// `name` is the configuration section the options were bound from, if any.
    fn validate(&self, name: Option<&str>, options: &T) -> ValidateOptionsResult;
}

/// Reports every blank required field of [`ClientOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientOptionsValidator;

impl ValidateOptions<ClientOptions> for ClientOptionsValidator {
    fn validate(&self, _name: Option<&str>, options: &ClientOptions) -> ValidateOptionsResult {
        let checks = [
            ("Username", &options.username),
            ("Password", &options.password),
            ("AppId", &options.app_id),
            ("AppKey", &options.app_key),
        ];

        let failures = checks
            .iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(field, _)| format!("{field} is required"))
            .collect();

        ValidateOptionsResult::from_failures(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_options() -> ClientOptions {
        ClientOptions {
            username: "dispatch".to_string(),
            password: "s3cret".to_string(),
            app_id: "app-1".to_string(),
            app_key: "key-1".to_string(),
            slug: None,
        }
    }

    #[test]
    fn test_valid_options_pass() {
        let result = ClientOptionsValidator.validate(None, &valid_options());
        assert!(result.succeeded());
        assert!(result.failures().is_empty());
    }

    #[test]
    fn test_all_blank_reports_every_field_in_order() {
        let options = ClientOptions {
            username: String::new(),
            password: "   ".to_string(),
            app_id: "\t".to_string(),
            app_key: String::new(),
            slug: Some("plant-7".to_string()),
        };

        let result = ClientOptionsValidator.validate(Some(ClientOptions::SECTION), &options);
        assert_eq!(
            result,
            ValidateOptionsResult::Fail(vec![
                "Username is required".to_string(),
                "Password is required".to_string(),
                "AppId is required".to_string(),
                "AppKey is required".to_string(),
            ])
        );
    }

    #[test]
    fn test_single_blank_field() {
        let options = ClientOptions {
            password: " ".to_string(),
            ..valid_options()
        };

        let result = ClientOptionsValidator.validate(None, &options);
        assert_eq!(result.failures(), ["Password is required".to_string()]);
    }

    #[test]
    fn test_slug_is_not_validated() {
        let options = ClientOptions {
            slug: Some(String::new()),
            ..valid_options()
        };
        assert!(ClientOptionsValidator.validate(None, &options).succeeded());
    }

    #[test]
    fn test_from_parameters_fails_on_first_blank() {
        let error = ClientOptions::from_parameters("", "", "", "", None).unwrap_err();
        match error {
            ClientError::InvalidArgument { param, message } => {
                assert_eq!(param, "username");
                assert_eq!(message, "Username cannot be null or empty");
            }
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }

        let error = ClientOptions::from_parameters("u", "p", " ", "k", None).unwrap_err();
        assert!(matches!(
            error,
            ClientError::InvalidArgument { param: "appId", .. }
        ));
    }

    #[test]
    fn test_from_parameters_keeps_slug() {
        let options = ClientOptions::from_parameters("u", "p", "a", "k", Some("yard")).unwrap();
        assert_eq!(options.slug.as_deref(), Some("yard"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", valid_options());
        assert!(debug.contains("dispatch"));
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("key-1"));
    }

    #[test]
    fn test_camel_case_binding() {
        let options: ClientOptions = serde_json::from_str(
            r#"{"username":"u","password":"p","appId":"a","appKey":"k","slug":"s"}"#,
        )
        .unwrap();
        assert_eq!(options.app_id, "a");
        assert_eq!(options.app_key, "k");
        assert_eq!(options.slug.as_deref(), Some("s"));
    }
}
