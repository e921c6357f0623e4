use reqwest::Method;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};

use crate::session::header_value;
use crate::{PortalClient, PortalError, Session};

const CSRF_COOKIE: &str = "csrftoken";
const SESSION_COOKIE: &str = "sessionid";

impl PortalClient {
    /// Log in and return the new session.
    ///
    /// Fetches `/login/` for a CSRF cookie, then posts the credentials with
    /// that cookie. The client's own session is left untouched; pass the
    /// result to [`PortalClient::with_session`].
    ///
    /// # Errors
    ///
    /// [`PortalError::BadCredentials`] unless the login response sets both
    /// `csrftoken` and `sessionid`.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, PortalError> {
        let landing = self
            .executor
            .execute(Method::GET, "/login/", None, HeaderMap::new())
            .await?;
        let csrf = landing.cookie(CSRF_COOKIE).unwrap_or_default().to_string();
        if csrf.is_empty() {
            tracing::warn!("login page set no csrf cookie");
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(COOKIE, header_value(&format!("{CSRF_COOKIE}={csrf}"), "cookie")?);

        let form = [
            ("csrfmiddlewaretoken", csrf),
            ("username", username.to_string()),
            ("password", password.to_string()),
            ("next", "/".to_string()),
        ];
        let response = self
            .executor
            .execute(Method::POST, "/login/", Some(form.as_slice()), headers)
            .await?;

        match (response.cookie(CSRF_COOKIE), response.cookie(SESSION_COOKIE)) {
            (Some(csrf), Some(session)) if !csrf.is_empty() && !session.is_empty() => {
                tracing::debug!(username, "logged in");
                Ok(Session::new(csrf, session))
            }
            _ => Err(PortalError::BadCredentials),
        }
    }
}
