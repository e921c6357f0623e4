//! # tally-config
//!
//! Layered configuration loading for tally using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TALLY_*` prefix, `__` as separator)
//! 2. Project-level `.tally/config.toml`
//! 3. User-level `~/.config/tally/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `TALLY_PORTAL__DOMAIN` -> `portal.domain` and
//! `TALLY_SESSION__SESSIONID` -> `session.sessionid`.
//!
//! Unlike read-only settings, the session cookies are written back by
//! `tly login`, so [`TallyConfig::save`] persists the whole config as TOML.
//!
//! # Usage
//!
//! ```no_run
//! use tally_config::TallyConfig;
//!
//! let mut config = TallyConfig::load_with_dotenv().expect("config");
//! config.portal.default_project = "internal".into();
//! config.save_user().expect("saved");
//! ```

mod error;
mod portal;
mod session;

pub use error::ConfigError;
pub use portal::{PortalConfig, validate_domain};
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl TallyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load defaults overlaid with a single TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] when the file is malformed.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                figment = figment.merge(Toml::file(user_path));
            }
        }

        let local_path = PathBuf::from(".tally/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TALLY_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tally").join("config.toml"))
    }

    /// Write the config as TOML to `path`, creating parent directories.
    ///
    /// On Unix the file is readable by its owner only, as it holds session
    /// cookies.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] or [`ConfigError::Io`].
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Save to [`Self::user_config_path`] and return the path written.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] when the platform has no config
    /// directory, otherwise see [`Self::save`].
    pub fn save_user(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::user_config_path().ok_or_else(|| ConfigError::NotConfigured {
            section: "user config directory".into(),
        })?;
        self.save(&path)?;
        Ok(path)
    }

    /// The portal section, if a domain is set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] naming `portal`.
    pub fn require_portal(&self) -> Result<&PortalConfig, ConfigError> {
        if self.portal.is_configured() {
            Ok(&self.portal)
        } else {
            Err(ConfigError::NotConfigured {
                section: "portal".into(),
            })
        }
    }

    /// The stored session, if both cookies are present.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] naming `session`.
    pub fn require_session(&self) -> Result<&SessionConfig, ConfigError> {
        if self.session.is_configured() {
            Ok(&self.session)
        } else {
            Err(ConfigError::NotConfigured {
                section: "session".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unconfigured() {
        let config = TallyConfig::default();
        assert!(!config.portal.is_configured());
        assert!(!config.session.is_configured());
        assert!(matches!(
            config.require_portal(),
            Err(ConfigError::NotConfigured { section }) if section == "portal"
        ));
        assert!(config.require_session().is_err());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: TallyConfig = TallyConfig::figment().extract()?;
            assert_eq!(config.portal.http_timeout_secs, 30);
            Ok(())
        });
    }
}
