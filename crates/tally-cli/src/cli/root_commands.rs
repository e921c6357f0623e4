use clap::{Args, Subcommand};

use crate::cli::subcommands::ConfigCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session cookies.
    Login(LoginArgs),
    /// Local configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Salary, reporting gaps and breaks of the current month.
    Dashboard,
    /// Reported entries of a month.
    History(HistoryArgs),
    /// Report work time.
    Report(ReportArgs),
    /// List projects available for reporting.
    Projects,
    /// Requested vacations and public holidays of a year.
    Vacations(VacationsArgs),
    /// Upcoming birthdays of colleagues.
    Birthdays,
    /// Profile of a colleague.
    User(UserArgs),
    /// Money and hours per month of a year.
    Stat(StatArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// Portal user name.
    #[arg(short, long)]
    pub username: String,
    /// Portal password.
    #[arg(long, env = "TALLY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Year (defaults to the current one).
    #[arg(long)]
    pub year: Option<i32>,
    /// Month number 1-12 (defaults to the current one).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Project name or a unique part of it (defaults to the configured project).
    #[arg(long)]
    pub proj: Option<String>,
    /// Duration placed after the day's latest entry, e.g. `2h` or `1h30m`.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub span: Option<String>,
    /// Start time, `HH:MM`.
    #[arg(long)]
    pub from: Option<String>,
    /// End time, `HH:MM`.
    #[arg(long)]
    pub to: Option<String>,
    /// Completion percentage in steps of ten.
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub status: i32,
    /// Activity name or prefix: estimate, development, testing, bugfixing,
    /// management, analysis.
    #[arg(long, default_value = "development")]
    pub activity: String,
    /// Task title (defaults to the project name).
    #[arg(long)]
    pub title: Option<String>,
    /// Task description.
    #[arg(short = 'm', long = "message")]
    pub message: String,
    /// Report date, `MM-DD` of the current year or `YYYY-MM-DD` (defaults to today).
    #[arg(long = "for")]
    pub for_date: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct VacationsArgs {
    /// Year (defaults to the current one).
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Clone, Debug, Args)]
pub struct UserArgs {
    /// Numeric user id, as shown by `birthdays`.
    pub id: u64,
}

#[derive(Clone, Debug, Args)]
pub struct StatArgs {
    /// Year (defaults to the current one).
    #[arg(long)]
    pub year: Option<i32>,
}
