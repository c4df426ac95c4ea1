use serde::{Deserialize, Serialize};

/// DataSF configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSfConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Stored credentials
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size used when the command line does not give one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

/// Credentials read from the configuration file.
///
/// Every field is optional; command line flags and environment variables
/// take priority over these.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl DataSfConfig {
    /// Copy safe to display, with secrets replaced by `***`
    pub fn masked(&self) -> Self {
        let mask = |value: &Option<String>| value.as_ref().map(|_| "***".to_string());
        Self {
            global: self.global.clone(),
            credentials: CredentialsConfig {
                api_key: mask(&self.credentials.api_key),
                username: self.credentials.username.clone(),
                password: mask(&self.credentials.password),
            },
        }
    }
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    10
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            timeout_secs: default_timeout_secs(),
            default_page_size: default_page_size(),
        }
    }
}
