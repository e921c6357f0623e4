use std::fmt;
use std::ops::Deref;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A vacation, day off or sick leave request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: String,
    pub kind: String,
    pub start_date: NaiveDate,
    /// `None` for open-ended requests (rendered as `-`).
    pub end_date: Option<NaiveDate>,
    /// Length in days; fractional for half days.
    pub span_days: f64,
    pub status: String,
    pub paid: bool,
}

impl Vacation {
    /// Days covered by walking `span_days` whole days from the start.
    fn covered_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = self.span_days.max(0.0).trunc() as u64;
        (0..whole).map_while(|offset| self.start_date.checked_add_days(Days::new(offset)))
    }

    /// Whether the vacation covers `day`.
    ///
    /// The start day always counts. Open-ended requests cover only their
    /// start day.
    #[must_use]
    pub fn vacated(&self, day: NaiveDate) -> bool {
        if self.start_date == day {
            return true;
        }
        if self.end_date.is_none() {
            return false;
        }
        self.covered_days().any(|covered| covered == day)
    }

    /// Whether any covered day falls in the month (and year) of `day`.
    #[must_use]
    pub fn in_month(&self, day: NaiveDate) -> bool {
        let same_month = |d: NaiveDate| d.year() == day.year() && d.month() == day.month();

        if same_month(self.start_date) {
            return true;
        }
        if self.end_date.is_none() {
            return false;
        }
        self.covered_days().any(same_month)
    }
}

impl fmt::Display for Vacation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self
            .end_date
            .map_or_else(|| "-".to_string(), |d| d.format("%-d %b").to_string());
        write!(
            f,
            "{} -- {} ({} days, {}): {}",
            self.start_date.format("%-d %b"),
            end,
            self.span_days,
            self.status,
            self.kind
        )?;
        if self.paid {
            f.write_str(", paid")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vacations(Vec<Vacation>);

impl Vacations {
    #[must_use]
    pub const fn new(vacations: Vec<Vacation>) -> Self {
        Self(vacations)
    }

    #[must_use]
    pub fn vacated(&self, day: NaiveDate) -> bool {
        self.0.iter().any(|v| v.vacated(day))
    }

    #[must_use]
    pub fn in_month(&self, day: NaiveDate) -> Self {
        Self(self.0.iter().filter(|v| v.in_month(day)).cloned().collect())
    }
}

impl Deref for Vacations {
    type Target = [Vacation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Vacation>> for Vacations {
    fn from(vacations: Vec<Vacation>) -> Self {
        Self(vacations)
    }
}

impl fmt::Display for Vacations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}
