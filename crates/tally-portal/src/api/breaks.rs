use reqwest::Method;
use tally_core::{Holidays, Vacations};

use crate::extract::{self, parse_holidays, parse_vacations};
use crate::{PortalClient, PortalError};

impl PortalClient {
    /// Vacations and public holidays of `year`, both from the breaks page.
    ///
    /// # Errors
    ///
    /// Transport, status or extraction failures.
    pub async fn vacations_holidays(&self, year: i32) -> Result<(Vacations, Holidays), PortalError> {
        let form = [("year", year.to_string()), ("year_changed", "true".to_string())];
        let page = self
            .fetch_page(Method::POST, "/breaks/", Some(form.as_slice()))
            .await?;

        let vacations = extract::record("vacations", &page, parse_vacations)?;
        let holidays = extract::record("holidays", &page, parse_holidays)?;
        tracing::debug!(year, vacations = vacations.len(), holidays = holidays.len(), "fetched breaks");
        Ok((vacations, holidays))
    }
}
