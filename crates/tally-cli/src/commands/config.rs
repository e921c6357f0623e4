use std::fmt;

use serde::Serialize;
use tally_config::{TallyConfig, validate_domain};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::output::output;

#[derive(Serialize)]
struct ConfigView {
    domain: String,
    default_project: String,
    http_timeout_secs: u64,
    logged_in: bool,
    config_path: Option<String>,
}

impl ConfigView {
    fn new(config: &TallyConfig) -> Self {
        Self {
            domain: config.portal.domain.clone(),
            default_project: config.portal.default_project.clone(),
            http_timeout_secs: config.portal.http_timeout_secs,
            logged_in: config.session.is_configured(),
            config_path: TallyConfig::user_config_path().map(|p| p.display().to_string()),
        }
    }
}

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_unset = |value: &str| {
            if value.is_empty() {
                "(not set)".to_string()
            } else {
                value.to_string()
            }
        };

        writeln!(f, "domain:          {}", or_unset(&self.domain))?;
        writeln!(f, "default project: {}", or_unset(&self.default_project))?;
        writeln!(f, "http timeout:    {}s", self.http_timeout_secs)?;
        write!(f, "logged in:       {}", if self.logged_in { "yes" } else { "no" })?;
        if let Some(path) = &self.config_path {
            write!(f, "\nconfig file:     {path}")?;
        }
        Ok(())
    }
}

/// Handle `tly config <subcommand>`.
pub fn handle(
    action: &ConfigCommands,
    config: &mut TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ConfigCommands::SetDomain { domain } => {
            let domain = validate_domain(domain)?;
            if config.portal.domain != domain {
                // Cookies belong to the previous portal.
                config.session = tally_config::SessionConfig::default();
            }
            config.portal.domain = domain;
            config.save_user()?;
        }
        ConfigCommands::SetProject { project } => {
            config.portal.default_project = project.trim().to_string();
            config.save_user()?;
        }
        ConfigCommands::Show => {}
    }

    output(&ConfigView::new(config), flags.format)
}
