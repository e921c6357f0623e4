use chrono::Datelike;
use reqwest::Method;
use tally_core::{Projects, ReportEntries, ReportEntry};

use crate::extract::{self, parse_history, parse_projects};
use crate::{PortalClient, PortalError};

impl PortalClient {
    /// Reported entries of one month, in page order.
    ///
    /// # Errors
    ///
    /// Transport, status or extraction failures.
    pub async fn history(&self, year: i32, month: u32) -> Result<ReportEntries, PortalError> {
        let form = [("year", year.to_string()), ("month", month.to_string())];
        let page = self
            .fetch_page(Method::POST, "/history/", Some(form.as_slice()))
            .await?;
        extract::record("history", &page, parse_history)
    }

    /// The project catalog. Never cached; every call refetches.
    ///
    /// # Errors
    ///
    /// Transport, status or extraction failures.
    pub async fn projects(&self) -> Result<Projects, PortalError> {
        let page = self.fetch_page(Method::GET, "/report/", None).await?;
        extract::record("projects", &page, parse_projects)
    }

    /// Submit an aligned entry and confirm the portal stored it.
    ///
    /// A successful submission answers `/report/` with an empty body. The
    /// month's history is then refetched and must contain a same-day entry
    /// equal to `entry` in project, activity, title, description, status
    /// and the hour and minute of both ends. That stored entry is returned.
    ///
    /// # Errors
    ///
    /// - [`PortalError::Report`] when `entry` lacks a form field.
    /// - [`PortalError::BadStatus`] when the submission answers with a body.
    /// - [`PortalError::NoReport`] when history has no entry for the day or
    ///   none matches.
    pub async fn report(&self, entry: &ReportEntry) -> Result<ReportEntry, PortalError> {
        let fields = entry.form_fields()?;
        let response = self
            .send(Method::POST, "/report/", Some(fields.as_slice()))
            .await?;
        if !response.body.is_empty() {
            return Err(PortalError::BadStatus(response.status_line));
        }

        let day = entry.report_date;
        let history = self.history(day.year(), day.month()).await?;
        if !history.reported_on(day) {
            return Err(PortalError::NoReport("no entries for the report date"));
        }

        let stored = history
            .on_day(day)
            .find(|stored| entry.matches_submission(stored))
            .cloned()
            .ok_or(PortalError::NoReport("stored entry differs from the submitted one"))?;
        tracing::debug!(id = %stored.id, date = %day, "report stored");
        Ok(stored)
    }
}
