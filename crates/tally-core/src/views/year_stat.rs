use std::fmt;
use std::ops::Deref;

use chrono::Datelike;
use serde::Serialize;

use crate::entities::{ReportEntries, Salaries};
use crate::span::format_span;

/// Histories of several months, one [`ReportEntries`] per month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupedEntries(Vec<ReportEntries>);

impl GroupedEntries {
    #[must_use]
    pub const fn new(months: Vec<ReportEntries>) -> Self {
        Self(months)
    }

    /// The group whose first entry falls in `year`/`month`.
    #[must_use]
    pub fn at(&self, year: i32, month: u32) -> Option<&ReportEntries> {
        self.0.iter().find(|entries| {
            entries
                .first()
                .is_some_and(|e| e.report_date.year() == year && e.report_date.month() == month)
        })
    }

    /// `January: Egg Inc. (120h), Internal (8h)` per non-empty month.
    #[must_use]
    pub fn year_view(&self) -> String {
        self.0
            .iter()
            .filter_map(|entries| {
                let first = entries.first()?;
                Some(format!(
                    "{}: {}",
                    first.report_date.format("%B"),
                    entries.project_hours()
                ))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Deref for GroupedEntries {
    type Target = [ReportEntries];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Money and time spent over the months of one year.
#[derive(Debug, Clone, Serialize)]
pub struct YearStat {
    pub year: i32,
    pub start_month: u32,
    pub end_month: u32,
    pub histories: GroupedEntries,
    pub salaries: Salaries,
}

impl fmt::Display for YearStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} report\n\n", self.year)?;

        write!(f, "Got ${:.2}", self.salaries.paid())?;
        let expected = self.salaries.expected();
        if expected > 0.0 {
            write!(f, ", expecting ${expected:.2}")?;
        }
        f.write_str("\n\n")?;

        for month in self.start_month..=self.end_month {
            let Some(history) = self.histories.at(self.year, month) else {
                continue;
            };
            if history.is_empty() {
                continue;
            }

            let paid = self
                .salaries
                .at(self.year, month)
                .map_or_else(|| "no salary".to_string(), |s| s.total_paid_summary());
            let label = history
                .first()
                .map(|e| e.report_date.format("%B").to_string())
                .unwrap_or_default();

            writeln!(
                f,
                "{label}: {paid}, spent {} in {}",
                format_span(history.total_duration()),
                history.project_hours()
            )?;
        }

        Ok(())
    }
}
