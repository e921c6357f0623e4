//! Views composed from several concurrent portal calls.
//!
//! Independent fetches run together and the first failure aborts the rest:
//! `try_join!` drops the sibling futures, which releases their request
//! permits. The executor's permit pool still caps what reaches the network,
//! so a twelve-month statistics run sends at most four requests at a time.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use futures_util::future::try_join_all;
use serde::Serialize;
use tally_core::{GroupedEntries, MonthInfo, ReportDraft, ReportEntry, Salaries, Salary, YearStat};

use crate::{PortalClient, PortalError};

/// Current month overview plus the previous month's salary.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub month: MonthInfo,
    pub last_month: Salary,
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Last month: {}", self.last_month.summary())?;
        write!(f, "{}", self.month)
    }
}

impl PortalClient {
    /// This month's salary, history and breaks alongside last month's
    /// salary.
    ///
    /// # Errors
    ///
    /// The first failing fetch.
    pub async fn dashboard(&self, today: NaiveDate) -> Result<Dashboard, PortalError> {
        let last = today.checked_sub_months(Months::new(1)).unwrap_or(today);

        let (salary, last_month, history, (vacations, holidays)) = tokio::try_join!(
            self.salary(today.year(), today.month()),
            self.salary(last.year(), last.month()),
            self.history(today.year(), today.month()),
            self.vacations_holidays(today.year()),
        )?;

        Ok(Dashboard {
            month: MonthInfo::new(today, salary, vacations, holidays, history),
            last_month,
        })
    }

    /// Salaries and histories of January through `through` (at most
    /// December), ordered by month.
    ///
    /// # Errors
    ///
    /// The first failing fetch.
    pub async fn year_stat(&self, year: i32, through: u32) -> Result<YearStat, PortalError> {
        let end_month = through.min(12);
        let months: Vec<u32> = (1..=end_month).collect();

        let (salaries, histories) = tokio::try_join!(
            try_join_all(months.iter().map(|&month| self.salary(year, month))),
            try_join_all(months.iter().map(|&month| self.history(year, month))),
        )?;
        tracing::debug!(year, months = months.len(), "fetched year statistics");

        Ok(YearStat {
            year,
            start_month: 1,
            end_month,
            histories: GroupedEntries::new(histories),
            salaries: Salaries::new(salaries),
        })
    }

    /// Resolve, align, submit and verify a draft.
    ///
    /// The draft's activity and status are expected to be set already. The
    /// day's history and the project catalog are fetched together; project
    /// resolution and alignment then run in order before anything is sent.
    ///
    /// # Errors
    ///
    /// The first failing fetch, any [`tally_core::ReportError`] from the
    /// engine, or a submission failure from [`PortalClient::report`].
    pub async fn submit_report(&self, draft: ReportDraft) -> Result<ReportEntry, PortalError> {
        let day = draft.report_date;
        let (history, projects) =
            tokio::try_join!(self.history(day.year(), day.month()), self.projects())?;

        let entry = draft.resolve_project(&projects)?.align(&history)?;
        tracing::debug!(
            project = %entry.project.name,
            start = %entry.start_time,
            end = %entry.end_time,
            "submitting report"
        );
        self.report(&entry).await
    }
}
