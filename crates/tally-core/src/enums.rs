//! Work activity kinds accepted by the portal.
//!
//! The portal's report form takes the activity as a numeric code (`0`–`5`)
//! while history pages render the human name in a selected `<option>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ReportError;

/// Kind of work a report entry is logged against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Estimate,
    #[default]
    Development,
    Testing,
    Bugfixing,
    Management,
    Analysis,
}

impl Activity {
    /// All activities in portal code order.
    pub const ALL: [Self; 6] = [
        Self::Estimate,
        Self::Development,
        Self::Testing,
        Self::Bugfixing,
        Self::Management,
        Self::Analysis,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Estimate => "estimate",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Bugfixing => "bugfixing",
            Self::Management => "management",
            Self::Analysis => "analysis",
        }
    }

    /// Numeric code posted in the report form.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Estimate => 0,
            Self::Development => 1,
            Self::Testing => 2,
            Self::Bugfixing => 3,
            Self::Management => 4,
            Self::Analysis => 5,
        }
    }

    /// Resolve a possibly abbreviated name (`dev`, `Test`, `b`).
    ///
    /// Matching is a case-insensitive prefix match in code order, so `"e"`
    /// resolves to [`Activity::Estimate`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::BadActivity`] when `short` is empty or is not a
    /// prefix of any activity name.
    pub fn from_prefix(short: &str) -> Result<Self, ReportError> {
        let needle = short.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ReportError::BadActivity(short.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|activity| activity.as_str().starts_with(&needle))
            .ok_or_else(|| ReportError::BadActivity(short.to_string()))
    }

    /// Exact, case-insensitive name lookup used for scraped history rows.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|activity| activity.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_prefix(s)
    }
}
