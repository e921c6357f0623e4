use reqwest::Method;
use tally_core::{Person, Persons, Salary};

use crate::extract::{self, parse_birthdays, parse_block_form_id, parse_profile, parse_salary};
use crate::{PortalClient, PortalError};

const BIRTHDAYS_PATH: &str =
    "/dashboard/block/birthdays_block/?time_range_field=birthdays_block_end_days&time_range_value=366";

impl PortalClient {
    /// Switch on the salary, birthdays and users dashboard blocks once per
    /// session.
    ///
    /// Concurrent callers wait for a single activation. A failure leaves the
    /// blocks marked off so the next call retries.
    ///
    /// # Errors
    ///
    /// [`PortalError::NoNode`] when the dashboard has no block form id,
    /// [`PortalError::NoId`] when that id is empty and
    /// [`PortalError::NonEmpty`] when the update answers with a body.
    pub async fn ensure_blocks_on(&self) -> Result<(), PortalError> {
        self.blocks.ensure_on(|| self.activate_blocks()).await
    }

    async fn activate_blocks(&self) -> Result<(), PortalError> {
        let page = self.fetch_page(Method::GET, "/dashboard/", None).await?;
        let id = extract::record("dashboard", &page, parse_block_form_id)?
            .ok_or(PortalError::NoNode(r#"input[name="id"]"#))?;
        if id.is_empty() {
            return Err(PortalError::NoId);
        }

        let form = [
            ("id", id),
            ("birthdays_block", "on".to_string()),
            ("user_salary_block", "on".to_string()),
            ("users_block", "on".to_string()),
        ];
        let response = self
            .send(Method::POST, "/dashboard/update/", Some(form.as_slice()))
            .await?;
        if !response.body.is_empty() {
            return Err(PortalError::NonEmpty(response.text()));
        }
        Ok(())
    }

    /// Salary block for one month.
    ///
    /// # Errors
    ///
    /// Block activation, transport, status or extraction failures.
    pub async fn salary(&self, year: i32, month: u32) -> Result<Salary, PortalError> {
        self.ensure_blocks_on().await?;

        let form = [("year", year.to_string()), ("month", month.to_string())];
        let page = self
            .fetch_page(
                Method::POST,
                "/dashboard/block/user_salary_block/",
                Some(form.as_slice()),
            )
            .await?;
        extract::record("salary", &page, |doc| parse_salary(doc, year, month))
    }

    /// Upcoming birthdays for the next year.
    ///
    /// # Errors
    ///
    /// Block activation, transport, status or extraction failures.
    pub async fn birthdays(&self) -> Result<Persons, PortalError> {
        self.ensure_blocks_on().await?;

        let page = self.fetch_page(Method::GET, BIRTHDAYS_PATH, None).await?;
        extract::record("birthdays", &page, parse_birthdays)
    }

    /// Profile page of a colleague.
    ///
    /// # Errors
    ///
    /// Transport, status or extraction failures.
    pub async fn person_info(&self, id: u64) -> Result<Person, PortalError> {
        let page = self
            .fetch_page(Method::GET, &format!("/dashboard/user_profile/{id}/"), None)
            .await?;
        extract::record("profile", &page, |doc| parse_profile(doc, id))
    }

    /// Raw bytes of a picture, by absolute URL or portal path.
    ///
    /// # Errors
    ///
    /// Transport or status failures.
    pub async fn picture(&self, url: &str) -> Result<Vec<u8>, PortalError> {
        Ok(self.send(Method::GET, url, None).await?.ensure_ok()?.body)
    }
}
