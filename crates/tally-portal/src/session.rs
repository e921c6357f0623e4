//! Authenticated session state.

use std::fmt;

use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue, REFERER};

use crate::error::PortalError;

const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

/// The two cookies that identify a logged-in user.
///
/// The default value is unauthenticated. A session is never mutated; a new
/// login produces a new value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    csrf_token: String,
    session_id: String,
}

impl Session {
    #[must_use]
    pub fn new(csrf_token: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            session_id: session_id.into(),
        }
    }

    #[must_use]
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.csrf_token.is_empty() && !self.session_id.is_empty()
    }

    /// Headers sent with every authenticated request.
    ///
    /// # Errors
    ///
    /// [`PortalError::InvalidHeader`] when a cookie holds bytes not allowed
    /// in a header.
    pub fn headers(&self, base_url: &str) -> Result<HeaderMap, PortalError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            header_value(
                &format!("csrftoken={}; sessionid={}", self.csrf_token, self.session_id),
                "cookie",
            )?,
        );
        headers.insert(CSRF_HEADER, header_value(&self.csrf_token, "x-csrftoken")?);
        headers.insert(
            REFERER,
            header_value(&format!("{base_url}/dashboard/"), "referer")?,
        );
        Ok(headers)
    }
}

pub(crate) fn header_value(value: &str, name: &'static str) -> Result<HeaderValue, PortalError> {
    HeaderValue::from_str(value).map_err(|_| PortalError::InvalidHeader(name))
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unauthenticated() {
        assert!(!Session::default().is_authenticated());
        assert!(!Session::new("csrf", "").is_authenticated());
        assert!(Session::new("csrf", "sid").is_authenticated());
    }

    #[test]
    fn headers_carry_both_cookies() {
        let headers = Session::new("csrf", "sid")
            .headers("https://portal.example.com")
            .unwrap();

        assert_eq!(headers[COOKIE], "csrftoken=csrf; sessionid=sid");
        assert_eq!(headers["x-csrftoken"], "csrf");
        assert_eq!(headers[REFERER], "https://portal.example.com/dashboard/");
    }

    #[test]
    fn debug_never_prints_cookies() {
        let rendered = format!("{:?}", Session::new("csrf-secret", "sid-secret"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn control_characters_are_rejected() {
        let err = Session::new("bad\nvalue", "sid")
            .headers("https://portal.example.com")
            .unwrap_err();
        assert!(matches!(err, PortalError::InvalidHeader("cookie")));
    }
}
