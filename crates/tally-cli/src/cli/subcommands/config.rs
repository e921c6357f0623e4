use clap::Subcommand;

/// Local configuration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Set the portal host name (no scheme, no path).
    SetDomain {
        domain: String,
    },
    /// Set the project used by `report` when `--proj` is omitted.
    SetProject {
        project: String,
    },
    /// Show the effective configuration; cookies are never printed.
    Show,
}
