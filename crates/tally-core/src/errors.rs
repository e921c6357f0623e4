//! Report engine error types.
//!
//! Every rejection reason of a candidate report has its own variant so that a
//! caller can tell a bad status from an unrounded time without string
//! matching. Transport and extraction failures live in `tally-portal`.

use std::fmt;

use thiserror::Error;

/// Which end of a time range an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start time"),
            Self::End => f.write_str("end time"),
        }
    }
}

/// Reasons a report draft is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no start time")]
    NoStartTime,

    #[error("no end time")]
    NoEndTime,

    #[error("start time is greater or equal than end time")]
    StartNotBeforeEnd,

    #[error("{0}: time must be rounded to 10 minutes")]
    TimeNotRounded(Bound),

    #[error("span must be a multiple of 10 minutes")]
    SpanNotRounded,

    #[error("status is less than zero")]
    StatusNegative,

    #[error("status is larger than 100")]
    StatusOver100,

    #[error("status must be rounded to 10")]
    StatusNotRound,

    #[error("{0}: bad activity")]
    BadActivity(String),

    #[error("lookup {0}: project not found")]
    ProjectNotFound(String),

    /// The project query matched more than one catalog entry.
    #[error("found multiple projects for {query} ({}): too permissive", matches.join(", "))]
    TooPermissive {
        query: String,
        matches: Vec<String>,
    },

    #[error("use only range or span")]
    RangeAndSpan,

    #[error("specify span or time range")]
    NoTime,

    #[error("overflow to the next day")]
    Overflow,

    /// The resolved interval collides with existing entries of the same day.
    #[error("overlaps with existing entries: {}", ids.join(", "))]
    Overlaps { ids: Vec<String> },

    #[error("no title")]
    NoTitle,

    #[error("no description")]
    NoDescription,

    #[error("project is not resolved")]
    NoProject,
}
