use std::fmt;
use std::ops::Deref;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.date.format("%a, %-d %b"), self.name)
    }
}

/// Public holidays of a year, as listed on the breaks page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Holidays(Vec<Holiday>);

impl Holidays {
    #[must_use]
    pub const fn new(holidays: Vec<Holiday>) -> Self {
        Self(holidays)
    }

    #[must_use]
    pub fn is_holiday(&self, day: NaiveDate) -> bool {
        self.0.iter().any(|holiday| holiday.date == day)
    }

    /// Holidays falling in the month (and year) of `day`.
    #[must_use]
    pub fn in_month(&self, day: NaiveDate) -> Self {
        Self(
            self.0
                .iter()
                .filter(|h| h.date.year() == day.year() && h.date.month() == day.month())
                .cloned()
                .collect(),
        )
    }
}

impl Deref for Holidays {
    type Target = [Holiday];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Holiday>> for Holidays {
    fn from(holidays: Vec<Holiday>) -> Self {
        Self(holidays)
    }
}

impl fmt::Display for Holidays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}
