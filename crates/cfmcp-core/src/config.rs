//! Credential configuration and the Auth Resolver
//!
//! Two mutually exclusive credential modes are supported:
//!
//! - **API token**: `Authorization: Bearer <token>`
//! - **Global API key**: `X-Auth-Email` + `X-Auth-Key`
//!
//! The token wins whenever it is set. Resolution happens per tool call, so a
//! server started without credentials still answers every tool with a
//! configuration error instead of refusing to start.

use crate::error::{Error, Result};

/// Header carrying the account email in key mode
pub const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";

/// Header carrying the global API key in key mode
pub const AUTH_KEY_HEADER: &str = "X-Auth-Key";

const MISSING_CREDENTIALS: &str =
    "CF_API_TOKEN or CF_API_KEY + CF_API_EMAIL must be set; check the env section of the server config";

/// The three credential strings, as read from the process environment
///
/// Empty strings mean "not set".
#[derive(Clone, Default)]
pub struct Credentials {
    /// Cloudflare API token
    pub api_token: String,

    /// Cloudflare global API key
    pub api_key: String,

    /// Account email paired with the global API key
    pub api_email: String,
}

// Secrets stay out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &redacted(&self.api_token))
            .field("api_key", &redacted(&self.api_key))
            .field("api_email", &self.api_email)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "<unset>" } else { "<REDACTED>" }
}

impl Credentials {
    /// Token-only credentials
    pub fn token(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Key + email credentials
    pub fn key(api_key: impl Into<String>, api_email: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_email: api_email.into(),
            ..Self::default()
        }
    }

    /// Select exactly one credential mode
    ///
    /// Token first, then key + email; otherwise a configuration error. There
    /// is no fallback between modes once one is chosen.
    pub fn resolve(&self) -> Result<AuthMode> {
        if !self.api_token.is_empty() {
            return Ok(AuthMode::Token(self.api_token.clone()));
        }
        if !self.api_key.is_empty() && !self.api_email.is_empty() {
            return Ok(AuthMode::Key {
                email: self.api_email.clone(),
                key: self.api_key.clone(),
            });
        }
        Err(Error::config(MISSING_CREDENTIALS))
    }
}

/// A resolved connection capability
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Bearer token
    Token(String),
    /// Global API key paired with the account email
    Key {
        /// Account email
        email: String,
        /// Global API key
        key: String,
    },
}

impl std::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Token(_) => f.write_str("AuthMode::Token(<REDACTED>)"),
            AuthMode::Key { email, .. } => f
                .debug_struct("AuthMode::Key")
                .field("email", email)
                .field("key", &"<REDACTED>")
                .finish(),
        }
    }
}

impl AuthMode {
    /// Short mode name, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            AuthMode::Token(_) => "token",
            AuthMode::Key { .. } => "key",
        }
    }

    /// Raw header pairs for direct HTTP calls
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        match self {
            AuthMode::Token(token) => vec![("Authorization", format!("Bearer {}", token))],
            AuthMode::Key { email, key } => vec![
                (AUTH_EMAIL_HEADER, email.clone()),
                (AUTH_KEY_HEADER, key.clone()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_only_resolves_to_bearer() {
        let mode = Credentials::token("tok").resolve().unwrap();
        assert_eq!(mode, AuthMode::Token("tok".to_string()));
        assert_eq!(
            mode.headers(),
            vec![("Authorization", "Bearer tok".to_string())]
        );
    }

    #[test]
    fn test_key_and_email_resolve_to_key_mode() {
        let mode = Credentials::key("k", "ops@example.com").resolve().unwrap();
        assert_eq!(mode.kind(), "key");
        assert_eq!(
            mode.headers(),
            vec![
                ("X-Auth-Email", "ops@example.com".to_string()),
                ("X-Auth-Key", "k".to_string()),
            ]
        );
    }

    #[test]
    fn test_token_takes_priority_over_key() {
        let creds = Credentials {
            api_token: "tok".to_string(),
            api_key: "k".to_string(),
            api_email: "ops@example.com".to_string(),
        };
        assert_eq!(creds.resolve().unwrap().kind(), "token");
    }

    #[test]
    fn test_key_without_email_is_a_config_error() {
        let err = Credentials::key("k", "").resolve().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_nothing_set_is_a_config_error() {
        let err = Credentials::default().resolve().unwrap_err();
        assert!(err.to_string().contains("CF_API_TOKEN"));
    }

    #[test]
    fn test_default_credentials_are_unset() {
        let creds = Credentials::default();
        assert!(creds.api_token.is_empty());
        assert!(creds.api_key.is_empty());
        assert!(creds.api_email.is_empty());
        assert_eq!(
            format!("{:?}", creds),
            r#"Credentials { api_token: "<unset>", api_key: "<unset>", api_email: "" }"#
        );
    }

    #[test]
    fn test_secrets_not_exposed_in_debug() {
        let creds = Credentials {
            api_token: "secret_token_12345".to_string(),
            api_key: "secret_key_67890".to_string(),
            api_email: "ops@example.com".to_string(),
        };
        let debug_str = format!("{:?} {:?}", creds, creds.resolve().unwrap());
        assert!(!debug_str.contains("secret_token"));
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("Credentials"));
    }
}
