//! Time-report engine.
//!
//! A [`ReportDraft`] moves through a fixed pipeline, each step consuming the
//! draft and returning a new value or a [`ReportError`]:
//!
//! 1. [`ReportDraft::set_activity`] resolves an abbreviated activity name.
//! 2. [`ReportDraft::set_status`] validates the completion percentage.
//! 3. [`ReportDraft::resolve_project`] matches the project query against the
//!    catalog.
//! 4. [`ReportDraft::align`] validates the time shape, anchors a span after
//!    the day's latest entry and rejects overlaps, yielding a
//!    [`ReportEntry`](crate::ReportEntry) ready for submission.

mod draft;

use chrono::{NaiveTime, TimeDelta, Timelike};

pub use draft::ReportDraft;

use crate::errors::{Bound, ReportError};

/// How the interval of a draft is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpec {
    /// Explicit, validated `[start, end)` range.
    Range { start: NaiveTime, end: NaiveTime },
    /// Positive duration to be anchored during alignment.
    Span(TimeDelta),
}

/// Validate a completion percentage and narrow it to `u8`.
///
/// # Errors
///
/// [`ReportError::StatusNegative`], [`ReportError::StatusOver100`] or
/// [`ReportError::StatusNotRound`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn check_status(status: i32) -> Result<u8, ReportError> {
    if status < 0 {
        return Err(ReportError::StatusNegative);
    }
    if status > 100 {
        return Err(ReportError::StatusOver100);
    }
    if status % 10 != 0 {
        return Err(ReportError::StatusNotRound);
    }
    Ok(status as u8)
}

/// Validate an explicit range.
///
/// An empty range (`None, None`) is accepted and yields `Ok(None)`; a full
/// range must be strictly ordered with both ends on a 10-minute boundary.
///
/// # Errors
///
/// [`ReportError::NoStartTime`] / [`ReportError::NoEndTime`] for a half
/// range, [`ReportError::StartNotBeforeEnd`] for an inverted or empty one,
/// [`ReportError::TimeNotRounded`] naming the offending end.
pub fn check_range(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<Option<(NaiveTime, NaiveTime)>, ReportError> {
    let (start, end) = match (start, end) {
        (None, None) => return Ok(None),
        (None, Some(_)) => return Err(ReportError::NoStartTime),
        (Some(_), None) => return Err(ReportError::NoEndTime),
        (Some(start), Some(end)) => (start, end),
    };

    if start >= end {
        return Err(ReportError::StartNotBeforeEnd);
    }
    if !is_rounded(start) {
        return Err(ReportError::TimeNotRounded(Bound::Start));
    }
    if !is_rounded(end) {
        return Err(ReportError::TimeNotRounded(Bound::End));
    }

    Ok(Some((start, end)))
}

fn is_rounded(time: NaiveTime) -> bool {
    time.minute() % 10 == 0 && time.second() == 0 && time.nanosecond() == 0
}

fn is_rounded_span(span: TimeDelta) -> bool {
    span.num_seconds() % 600 == 0 && span.subsec_nanos() == 0
}
