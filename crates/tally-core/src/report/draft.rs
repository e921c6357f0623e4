use chrono::{NaiveDate, NaiveTime, TimeDelta};

use super::{TimeSpec, check_range, check_status, is_rounded_span};
use crate::entities::{Project, Projects, ReportEntries, ReportEntry};
use crate::enums::Activity;
use crate::errors::ReportError;

/// Start of the working day; spans are anchored here on an empty day.
const DAY_START: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// A candidate report entry before alignment.
///
/// Carries either an explicit range (`start_time`/`end_time`) or a `span`.
/// `project` holds the user's query until
/// [`resolve_project`](Self::resolve_project) replaces it with a catalog
/// entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub report_date: NaiveDate,
    pub project: Project,
    pub activity: Activity,
    pub name: String,
    pub description: String,
    pub status: u8,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub span: Option<TimeDelta>,
}

impl ReportDraft {
    /// A fully finished development draft for `report_date`.
    #[must_use]
    pub fn new(
        report_date: NaiveDate,
        project_query: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            report_date,
            project: Project::named(project_query),
            activity: Activity::default(),
            name: String::new(),
            description: description.into(),
            status: 100,
            start_time: None,
            end_time: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.name = title.into();
        self
    }

    #[must_use]
    pub const fn with_range(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    #[must_use]
    pub const fn with_span(mut self, span: Option<TimeDelta>) -> Self {
        self.span = span;
        self
    }

    /// Resolve an abbreviated activity name.
    ///
    /// # Errors
    ///
    /// [`ReportError::BadActivity`] when `short` prefixes no activity.
    pub fn set_activity(mut self, short: &str) -> Result<Self, ReportError> {
        self.activity = Activity::from_prefix(short)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// See [`check_status`].
    pub fn set_status(mut self, status: i32) -> Result<Self, ReportError> {
        self.status = check_status(status)?;
        Ok(self)
    }

    /// Replace the project query with the single matching catalog entry.
    ///
    /// An empty title defaults to the resolved project name.
    ///
    /// # Errors
    ///
    /// [`ReportError::ProjectNotFound`] or [`ReportError::TooPermissive`].
    pub fn resolve_project(mut self, catalog: &Projects) -> Result<Self, ReportError> {
        self.project = catalog.find(&self.project.name)?.clone();
        if self.name.is_empty() {
            self.name.clone_from(&self.project.name);
        }
        Ok(self)
    }

    /// Validate the raw time shape.
    ///
    /// Non-positive spans count as absent.
    ///
    /// # Errors
    ///
    /// [`ReportError::RangeAndSpan`] when both a range (or half of one) and a
    /// span are given, [`ReportError::NoTime`] when neither is,
    /// [`ReportError::SpanNotRounded`] for a span off the 10-minute grid, and
    /// any [`check_range`] error.
    pub fn time_spec(&self) -> Result<TimeSpec, ReportError> {
        let span = self.span.filter(|span| *span > TimeDelta::zero());
        let has_range = self.start_time.is_some() || self.end_time.is_some();

        match (has_range, span) {
            (true, Some(_)) => Err(ReportError::RangeAndSpan),
            (false, None) => Err(ReportError::NoTime),
            (false, Some(span)) if !is_rounded_span(span) => Err(ReportError::SpanNotRounded),
            (false, Some(span)) => Ok(TimeSpec::Span(span)),
            (true, None) => check_range(self.start_time, self.end_time)?
                .map(|(start, end)| TimeSpec::Range { start, end })
                .ok_or(ReportError::NoTime),
        }
    }

    /// Resolve the interval against `history` and produce the entry to submit.
    ///
    /// A span starts at 09:00, or where the latest entry of the same day ends.
    /// The result depends only on the draft and `history`.
    ///
    /// # Errors
    ///
    /// Any [`time_spec`](Self::time_spec) error, [`ReportError::Overflow`]
    /// when the interval would reach midnight, and [`ReportError::Overlaps`]
    /// listing the ids of colliding same-day entries.
    pub fn align(self, history: &ReportEntries) -> Result<ReportEntry, ReportError> {
        let (start, end) = match self.time_spec()? {
            TimeSpec::Range { start, end } => (start, end),
            TimeSpec::Span(span) => {
                let start = history
                    .latest_for_day(self.report_date)
                    .map_or(DAY_START, |latest| latest.end_time);
                let (end, wrapped) = start.overflowing_add_signed(span);
                if wrapped != 0 {
                    return Err(ReportError::Overflow);
                }
                (start, end)
            }
        };

        let entry = ReportEntry {
            id: String::new(),
            publish_date: None,
            report_date: self.report_date,
            project: self.project,
            activity: self.activity,
            name: self.name,
            description: self.description,
            status: self.status,
            start_time: start,
            end_time: end,
            span: end - start,
        };

        let ids: Vec<String> = history
            .overlapping(&entry)
            .into_iter()
            .map(|existing| existing.id.clone())
            .collect();
        if !ids.is_empty() {
            return Err(ReportError::Overlaps { ids });
        }

        Ok(entry)
    }
}
