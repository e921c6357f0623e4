//! Portal location and HTTP settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default HTTP client timeout in seconds.
const fn default_http_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortalConfig {
    /// Host name of the portal, without scheme (e.g., `portal.example.com`).
    #[serde(default)]
    pub domain: String,

    /// Project query used by `report` when `--proj` is not given.
    #[serde(default)]
    pub default_project: String,

    /// Whole-request timeout for the HTTP client, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            default_project: String::new(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl PortalConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Normalize a user-supplied portal domain.
///
/// Trims whitespace and a trailing slash.
///
/// # Errors
///
/// [`ConfigError::InvalidValue`] for an empty domain or one carrying a
/// scheme, a path or inner whitespace.
pub fn validate_domain(domain: &str) -> Result<String, ConfigError> {
    let domain = domain.trim().trim_end_matches('/');
    let invalid = |reason: &str| ConfigError::InvalidValue {
        field: "portal.domain".into(),
        reason: reason.into(),
    };

    if domain.is_empty() {
        return Err(invalid("domain is empty"));
    }
    if domain.contains("://") {
        return Err(invalid("give the host only, without a scheme"));
    }
    if domain.contains('/') {
        return Err(invalid("give the host only, without a path"));
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(invalid("domain contains whitespace"));
    }

    Ok(domain.to_string())
}
