//! # tally-portal
//!
//! HTTP client for the work-tracking portal.
//!
//! The portal has no API; every call is a form post or page fetch whose
//! HTML is scraped into `tally-core` records. This crate provides:
//! - [`Session`]: the `csrftoken`/`sessionid` cookie pair and its headers
//! - [`RequestExecutor`]: a shared HTTP client capped at four in-flight
//!   requests, with redirects disabled
//! - [`BlockGate`]: one-time activation of the salary and birthdays blocks
//! - [`extract`]: table-driven page extraction for every record type
//! - [`PortalClient`]: the portal operations, split by page in `api/`
//! - [`overview`]: concurrent fan-out views built from several calls

pub mod extract;
pub mod overview;

mod api;
mod error;
mod gate;
mod http;
mod session;

pub use error::{ExtractError, PortalError};
pub use gate::BlockGate;
pub use http::{MAX_IN_FLIGHT, RawResponse, RequestExecutor};
pub use session::Session;

use std::time::Duration;

use reqwest::Method;

// ── Client ─────────────────────────────────────────────────────────

/// Client for one portal domain and one session.
///
/// Calls take `&self` and may run concurrently; the executor's permit pool
/// bounds what actually hits the network.
#[derive(Debug)]
pub struct PortalClient {
    executor: RequestExecutor,
    session: Session,
    blocks: BlockGate,
}

impl PortalClient {
    /// Client for `https://{domain}` without a session.
    ///
    /// # Errors
    ///
    /// [`PortalError::Http`] if the HTTP client cannot be built.
    pub fn new(domain: &str, timeout: Duration) -> Result<Self, PortalError> {
        Self::with_base_url(format!("https://{domain}"), timeout)
    }

    /// Client for an explicit base URL, such as a local mock server.
    ///
    /// # Errors
    ///
    /// [`PortalError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PortalError> {
        Ok(Self {
            executor: RequestExecutor::new(base_url, timeout)?,
            session: Session::default(),
            blocks: BlockGate::new(),
        })
    }

    /// Use `session` for subsequent calls. Block activation is tied to a
    /// session, so the gate starts closed again.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self.blocks = BlockGate::new();
        self
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Send an authenticated request without checking its status.
    async fn send(
        &self,
        method: Method,
        path: &str,
        form: Option<&[(&str, String)]>,
    ) -> Result<RawResponse, PortalError> {
        let headers = self.session.headers(self.executor.base_url())?;
        self.executor.execute(method, path, form, headers).await
    }

    /// Send an authenticated request and return the body of a `200 OK`.
    async fn fetch_page(
        &self,
        method: Method,
        path: &str,
        form: Option<&[(&str, String)]>,
    ) -> Result<String, PortalError> {
        Ok(self.send(method, path, form).await?.ensure_ok()?.text())
    }
}
