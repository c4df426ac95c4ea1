use crate::domain::config::CredentialsConfig;

pub const API_KEY_ENV: &str = "API_KEY";
pub const USERNAME_ENV: &str = "USERNAME";
pub const PASSWORD_ENV: &str = "PASSWORD";

/// Authentication attached to every request of a client session
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent verbatim as `Authorization: Basic <key>`
    ApiKey(String),
    /// Sent through HTTP basic auth
    Basic { username: String, password: String },
    Anonymous,
}

/// Credential values supplied explicitly, usually from command line flags
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Resolve credentials from the process environment
    pub fn resolve(overrides: &CredentialOverrides, config: &CredentialsConfig) -> Self {
        Self::resolve_with(overrides, config, |name| std::env::var(name).ok())
    }

    /// Resolve credentials with a custom environment lookup.
    ///
    /// Each value is taken from the first non-empty source: explicit value,
    /// environment, configuration file. An API key from any source wins over
    /// a username/password pair.
    pub fn resolve_with<F>(
        overrides: &CredentialOverrides,
        config: &CredentialsConfig,
        env: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &Option<String>, var: &str, stored: &Option<String>| {
            non_empty(explicit.clone())
                .or_else(|| non_empty(env(var)))
                .or_else(|| non_empty(stored.clone()))
        };

        if let Some(key) = pick(&overrides.api_key, API_KEY_ENV, &config.api_key) {
            return Self::ApiKey(key);
        }

        let username = pick(&overrides.username, USERNAME_ENV, &config.username);
        let password = pick(&overrides.password, PASSWORD_ENV, &config.password);
        match (username, password) {
            (Some(username), Some(password)) => Self::Basic { username, password },
            _ => Self::Anonymous,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => write!(f, "api key"),
            Credentials::Basic { username, .. } => write!(f, "basic auth as {}", username),
            Credentials::Anonymous => write!(f, "anonymous"),
        }
    }
}
