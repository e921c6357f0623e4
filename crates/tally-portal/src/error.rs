//! Portal error types.

use tally_core::ReportError;
use thiserror::Error;

/// Errors raised while turning a page into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A required field's node is missing from the page.
    #[error("{field}: node not found ({locator})")]
    NodeNotFound {
        field: &'static str,
        locator: String,
    },

    /// A required field's node lacks the attribute to read.
    #[error("{field}: attribute '{attribute}' missing")]
    MissingAttribute {
        field: &'static str,
        attribute: &'static str,
    },

    /// The node was found but its text did not parse.
    #[error("{field}: cannot parse '{value}': {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A built-in CSS selector failed to compile.
    #[error("bad selector: {0}")]
    Selector(String),

    /// The `Total / Paid` cell does not hold exactly two numbers.
    #[error("bad total / paid: '{0}'")]
    BadTotalPaid(String),
}

/// Errors returned by [`PortalClient`](crate::PortalClient) operations.
#[derive(Debug, Error)]
pub enum PortalError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The portal answered with something other than `200 OK`.
    #[error("bad status: {0}")]
    BadStatus(String),

    /// Login did not yield both session cookies.
    #[error("bad credentials")]
    BadCredentials,

    /// The dashboard page has no node the block gate needs.
    #[error("no node: {0}")]
    NoNode(&'static str),

    /// The dashboard block form carries an empty id.
    #[error("no id for dashboard blocks")]
    NoId,

    /// Activating dashboard blocks returned a body.
    #[error("non-empty response: {0}")]
    NonEmpty(String),

    /// The submitted report cannot be found in the history.
    #[error("report was not saved: {0}")]
    NoReport(&'static str),

    #[error("extract {record}: {source}")]
    Extract {
        record: &'static str,
        #[source]
        source: ExtractError,
    },

    #[error(transparent)]
    Report(#[from] ReportError),

    /// A header value could not be built from session data.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// The request permit pool was closed.
    #[error("request permit pool closed")]
    PermitPoolClosed,
}

impl PortalError {
    /// Wrap an extraction failure with the record it belongs to.
    #[must_use]
    pub fn extract(record: &'static str) -> impl Fn(ExtractError) -> Self {
        move |source| Self::Extract { record, source }
    }
}
