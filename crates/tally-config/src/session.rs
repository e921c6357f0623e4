//! Stored portal session cookies.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Value of the `csrftoken` cookie.
    #[serde(default)]
    pub csrftoken: String,

    /// Value of the `sessionid` cookie.
    #[serde(default)]
    pub sessionid: String,
}

impl SessionConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.csrftoken.is_empty() && !self.sessionid.is_empty()
    }
}

/// Cookie values are never printed.
impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |value: &str| if value.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("SessionConfig")
            .field("csrftoken", &mask(&self.csrftoken))
            .field("sessionid", &mask(&self.sessionid))
            .finish()
    }
}
