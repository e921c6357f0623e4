use std::ops::Deref;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Salary block snapshot for one `(year, month)`.
///
/// Immutable once extracted. Money fields are dollars, hour fields are
/// hours; `working_days_in_month` is a day count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub year: i32,
    pub month: u32,
    pub rate_per_hour: f64,
    pub rate: f64,
    pub hours_by_current_day: f64,
    pub dollars_by_current_day: f64,
    pub expected_salary: f64,
    pub vacation_hours: f64,
    pub vacation_dollars: f64,
    pub overtime_hours: f64,
    pub overtime_dollars: f64,
    pub bonus_dollars: f64,
    pub working_days_in_month: f64,
    pub total: f64,
    pub paid: f64,
}

impl Salary {
    /// `May, 2021`. Falls back to the raw numbers for an invalid month.
    #[must_use]
    pub fn month_label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).map_or_else(
            || format!("{:02}, {}", self.month, self.year),
            |date| date.format("%B, %Y").to_string(),
        )
    }

    /// `got $1234.50` once paid, `expected $1200.00` before that.
    #[must_use]
    pub fn total_paid_summary(&self) -> String {
        if self.paid > 0.0 {
            format!("got ${:.2}", self.paid)
        } else {
            format!("expected ${:.2}", self.expected_salary)
        }
    }

    /// `May, 2021: got $1234.50`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}: {}", self.month_label(), self.total_paid_summary())
    }

    #[must_use]
    pub fn hours_summary(&self) -> String {
        format!(
            "Reported: {:.2} of {:.2}",
            self.hours_by_current_day, self.working_days_in_month
        )
    }

    /// Hours expected for the whole month at eight per working day.
    #[must_use]
    pub fn hours_in_month(&self) -> f64 {
        self.working_days_in_month * 8.0
    }
}

/// Salaries of several months, in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salaries(Vec<Salary>);

impl Salaries {
    #[must_use]
    pub const fn new(salaries: Vec<Salary>) -> Self {
        Self(salaries)
    }

    #[must_use]
    pub fn paid(&self) -> f64 {
        self.0.iter().map(|s| s.paid).sum()
    }

    #[must_use]
    pub fn expected(&self) -> f64 {
        self.0.iter().map(|s| s.expected_salary).sum()
    }

    #[must_use]
    pub fn at(&self, year: i32, month: u32) -> Option<&Salary> {
        self.0.iter().find(|s| s.year == year && s.month == month)
    }
}

impl Deref for Salaries {
    type Target = [Salary];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Salary>> for Salaries {
    fn from(salaries: Vec<Salary>) -> Self {
        Self(salaries)
    }
}
