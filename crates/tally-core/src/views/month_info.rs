use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::entities::{Holidays, ReportEntries, Salary, Vacations};

/// Days after which an unreported working day counts as missed.
const GRACE_DAYS: i64 = 3;

/// Reporting progress of the month containing `today`.
#[derive(Debug, Clone, Serialize)]
pub struct MonthInfo {
    pub today: NaiveDate,
    pub salary: Salary,
    pub vacations: Vacations,
    pub holidays: Holidays,
    pub history: ReportEntries,
}

impl MonthInfo {
    #[must_use]
    pub const fn new(
        today: NaiveDate,
        salary: Salary,
        vacations: Vacations,
        holidays: Holidays,
        history: ReportEntries,
    ) -> Self {
        Self {
            today,
            salary,
            vacations,
            holidays,
            history,
        }
    }

    /// Weekdays from the 1st through `today` that are neither vacation nor
    /// holiday.
    #[must_use]
    pub fn working_days(&self) -> Vec<NaiveDate> {
        (1..=self.today.day())
            .filter_map(|d| self.today.with_day(d))
            .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
            .filter(|day| !self.vacations.vacated(*day))
            .filter(|day| !self.holidays.is_holiday(*day))
            .collect()
    }

    /// Working days without any report, split into `(missed, pending)`.
    ///
    /// A day is missed once it is more than three days behind `today`.
    #[must_use]
    pub fn need_reporting(&self) -> (Vec<NaiveDate>, Vec<NaiveDate>) {
        self.working_days()
            .into_iter()
            .filter(|day| !self.history.reported_on(*day))
            .partition(|day| (self.today - *day).num_days() > GRACE_DAYS)
    }

    #[must_use]
    pub fn hours_in_month(&self) -> f64 {
        self.salary.hours_in_month()
    }
}

fn day_list(days: &[NaiveDate]) -> String {
    days.iter()
        .map(|day| day.format("%a %-d").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for MonthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hours in month: {:.0} ({:.0} days)",
            self.hours_in_month(),
            self.salary.working_days_in_month
        )?;
        writeln!(
            f,
            "Reported as of today: {:.1} / {}",
            self.salary.hours_by_current_day,
            self.working_days().len() * 8
        )?;

        let (missed, pending) = self.need_reporting();
        if !missed.is_empty() {
            writeln!(f, "Missed reporting for {}", day_list(&missed))?;
        }
        if !pending.is_empty() {
            writeln!(f, "Need to report for {}", day_list(&pending))?;
        }

        let holidays = self.holidays.in_month(self.today);
        if !holidays.is_empty() {
            write!(f, "\nHolidays:\n{holidays}\n")?;
        }

        let vacations = self.vacations.in_month(self.today);
        if !vacations.is_empty() {
            write!(f, "\nVacations:\n{vacations}\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeDelta};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{Holiday, Project, ReportEntry, Vacation};

    fn may(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, d).unwrap()
    }

    fn reported(d: u32) -> ReportEntry {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        ReportEntry {
            id: d.to_string(),
            report_date: may(d),
            project: Project::named("P"),
            start_time: nine,
            end_time: nine + TimeDelta::hours(8),
            span: TimeDelta::hours(8),
            ..ReportEntry::default()
        }
    }

    // May 2021: the 1st is a Saturday, the 10th a holiday, 12-13 vacation.
    fn info(today: u32) -> MonthInfo {
        MonthInfo::new(
            may(today),
            Salary {
                year: 2021,
                month: 5,
                working_days_in_month: 20.0,
                hours_by_current_day: 24.0,
                ..Salary::default()
            },
            Vacations::new(vec![Vacation {
                id: "v".into(),
                kind: "Vacation".into(),
                start_date: may(12),
                end_date: Some(may(13)),
                span_days: 2.0,
                ..Vacation::default()
            }]),
            Holidays::new(vec![Holiday {
                name: "Victory Day".into(),
                date: may(10),
            }]),
            ReportEntries::new(vec![reported(3), reported(4), reported(5)]),
        )
    }

    #[test]
    fn working_days_skip_weekends_holidays_and_vacations() {
        let days: Vec<u32> = info(14).working_days().iter().map(Datelike::day).collect();
        assert_eq!(days, vec![3, 4, 5, 6, 7, 11, 14]);
    }

    #[test]
    fn unreported_days_split_by_grace_period() {
        let (missed, pending) = info(14).need_reporting();
        let missed: Vec<u32> = missed.iter().map(Datelike::day).collect();
        let pending: Vec<u32> = pending.iter().map(Datelike::day).collect();
        assert_eq!(missed, vec![6, 7]);
        assert_eq!(pending, vec![11, 14]);
    }

    #[test]
    fn summary_lists_month_context() {
        let rendered = info(14).to_string();
        assert!(rendered.starts_with("Hours in month: 160 (20 days)\n"));
        assert!(rendered.contains("Reported as of today: 24.0 / 56"));
        assert!(rendered.contains("Missed reporting for Thu 6, Fri 7"));
        assert!(rendered.contains("Need to report for Tue 11, Fri 14"));
        assert!(rendered.contains("Holidays:\nMon, 10 May -- Victory Day"));
        assert!(rendered.contains("Vacations:\n"));
    }
}
