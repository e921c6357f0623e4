//! Request executor shared by all portal calls.
//!
//! Every request holds one of four permits for its whole lifetime, so at
//! most four requests are in flight per client. Dropping a request future
//! releases its permit. Redirects are never followed: an expired session
//! shows up as a `302` status instead of a parsed login page.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, REFERER, SET_COOKIE};
use reqwest::{Method, StatusCode, redirect};
use tokio::sync::Semaphore;

use crate::error::PortalError;
use crate::session::header_value;

/// Concurrent requests allowed per client.
pub const MAX_IN_FLIGHT: usize = 4;

/// Status, body and cookies of one finished request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    /// `200 OK`, `302 Found`, ...
    pub status_line: String,
    pub body: Vec<u8>,
    /// `(name, value)` pairs from every `Set-Cookie` header, in order.
    pub cookies: Vec<(String, String)>,
}

impl RawResponse {
    /// Value of the last `Set-Cookie` for `name`.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .rev()
            .find(|(cookie, _)| cookie == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// # Errors
    ///
    /// [`PortalError::BadStatus`] carrying the status line for anything but
    /// `200 OK`.
    pub fn ensure_ok(self) -> Result<Self, PortalError> {
        if self.status == StatusCode::OK {
            Ok(self)
        } else {
            Err(PortalError::BadStatus(self.status_line))
        }
    }
}

/// HTTP client bound to one portal base URL with a bounded permit pool.
#[derive(Debug)]
pub struct RequestExecutor {
    http: reqwest::Client,
    base_url: String,
    permits: Semaphore,
}

impl RequestExecutor {
    /// # Errors
    ///
    /// [`PortalError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PortalError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tally/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            permits: Semaphore::new(MAX_IN_FLIGHT),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`; absolute inputs pass through unchanged.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Send one request.
    ///
    /// Adds a `Referer` of the login page unless `headers` has one. A form
    /// body is URL-encoded and forces the form content type. The status is
    /// not checked here.
    ///
    /// # Errors
    ///
    /// [`PortalError::Http`] for transport failures and
    /// [`PortalError::PermitPoolClosed`] if the pool was closed.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        form: Option<&[(&str, String)]>,
        mut headers: HeaderMap,
    ) -> Result<RawResponse, PortalError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| PortalError::PermitPoolClosed)?;

        let url = self.url(path);
        if !headers.contains_key(REFERER) {
            headers.insert(REFERER, header_value(&self.url("/login/"), "referer")?);
        }

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(form) = form {
            request = request
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encode_form(form));
        }

        tracing::debug!(%method, %url, "portal request");
        let response = request.send().await?;

        let status = response.status();
        let cookies = parse_set_cookies(response.headers());
        let body = response.bytes().await?.to_vec();
        tracing::debug!(%method, %url, %status, bytes = body.len(), "portal response");

        Ok(RawResponse {
            status,
            status_line: status.to_string(),
            body,
            cookies,
        })
    }
}

/// `application/x-www-form-urlencoded` body for `fields`, in order.
#[must_use]
pub fn encode_form(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_set_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| {
            let pair = raw.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_string(), value.trim().trim_matches('"').to_string()))
        })
        .collect()
}
