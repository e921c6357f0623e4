use std::fmt;
use std::ops::Deref;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use super::project::{Project, ProjectHours, ProjectsHours};
use crate::enums::Activity;
use crate::errors::ReportError;
use crate::span::{self, format_span};

/// One logged unit of work on a calendar day.
///
/// Entries scraped from the history page carry an `id` and a publish date;
/// entries produced by [`ReportDraft::align`](crate::ReportDraft::align) have
/// neither until the portal accepts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    pub publish_date: Option<NaiveDate>,
    pub report_date: NaiveDate,
    pub project: Project,
    pub activity: Activity,
    pub name: String,
    pub description: String,
    pub status: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(with = "span::minutes")]
    pub span: TimeDelta,
}

impl Default for ReportEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            publish_date: None,
            report_date: NaiveDate::default(),
            project: Project::default(),
            activity: Activity::default(),
            name: String::new(),
            description: String::new(),
            status: 0,
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            span: TimeDelta::zero(),
        }
    }
}

impl ReportEntry {
    /// Half-open interval overlap on the time of day: `[start, end)`.
    ///
    /// Identical intervals overlap, nested intervals overlap, touching
    /// intervals (`a.end == b.start`) do not. The relation is symmetric.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    /// Moment this entry's interval ends on its report day.
    #[must_use]
    pub fn ends_at(&self) -> NaiveDateTime {
        self.report_date.and_time(self.end_time)
    }

    /// Whether `other` is what the portal shows for a submitted `self`.
    ///
    /// Compares day, project name, activity, title, description, status and
    /// the hour and minute of both ends. Ids and publish dates are ignored.
    #[must_use]
    pub fn matches_submission(&self, other: &Self) -> bool {
        let hm = |t: NaiveTime| (t.hour(), t.minute());

        self.report_date == other.report_date
            && self.project.name == other.project.name
            && self.activity == other.activity
            && self.name == other.name
            && self.description == other.description
            && self.status == other.status
            && hm(self.start_time) == hm(other.start_time)
            && hm(self.end_time) == hm(other.end_time)
    }

    /// Form fields for `POST /report/`.
    ///
    /// # Errors
    ///
    /// Returns the first missing piece: [`ReportError::NoProject`],
    /// [`ReportError::NoTitle`], [`ReportError::NoDescription`], a status
    /// error, or [`ReportError::StartNotBeforeEnd`] for an empty interval.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, ReportError> {
        if self.project.id.is_empty() {
            return Err(ReportError::NoProject);
        }
        if self.name.is_empty() {
            return Err(ReportError::NoTitle);
        }
        if self.description.is_empty() {
            return Err(ReportError::NoDescription);
        }
        crate::report::check_status(i32::from(self.status))?;
        if self.start_time >= self.end_time {
            return Err(ReportError::StartNotBeforeEnd);
        }

        Ok(vec![
            ("report_date", self.report_date.format("%Y-%m-%d").to_string()),
            ("project_id", self.project.id.clone()),
            ("activity", self.activity.code().to_string()),
            ("task_name", self.name.clone()),
            ("task_desc", self.description.clone()),
            ("status", self.status.to_string()),
            ("start_report_hours", self.start_time.format("%H").to_string()),
            ("start_report_minutes", self.start_time.format("%M").to_string()),
            ("end_report_hours", self.end_time.format("%H").to_string()),
            ("end_report_minutes", self.end_time.format("%M").to_string()),
            ("overtime", "1".to_string()),
        ])
    }

    /// One-line rendering: `#42 2h Fix login`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("#{} {} {}", self.id, format_span(self.span), self.name)
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Project:     {}", self.project.name)?;
        writeln!(f, "Report date: {}", self.report_date.format("%B %-d, %A"))?;
        writeln!(f, "Activity:    {}", self.activity)?;
        writeln!(f, "Status:      {}", self.status)?;
        writeln!(
            f,
            "Time:        {}-{} ({})",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
            format_span(self.span)
        )?;
        writeln!(f)?;
        writeln!(f, "Name:        {}", self.name)?;
        write!(f, "Desc:        {}", self.description)
    }
}

/// Report entries in the order the history page lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportEntries(Vec<ReportEntry>);

impl ReportEntries {
    #[must_use]
    pub const fn new(entries: Vec<ReportEntry>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<ReportEntry> {
        self.0
    }

    /// Entries reported for `day`, in page order.
    pub fn on_day(&self, day: NaiveDate) -> impl Iterator<Item = &ReportEntry> {
        self.0.iter().filter(move |entry| entry.report_date == day)
    }

    #[must_use]
    pub fn reported_on(&self, day: NaiveDate) -> bool {
        self.on_day(day).next().is_some()
    }

    /// The entry of `day` whose interval ends last.
    ///
    /// Works on a sorted copy; the collection keeps its page order. Ties keep
    /// page order.
    #[must_use]
    pub fn latest_for_day(&self, day: NaiveDate) -> Option<ReportEntry> {
        let mut sorted = self.0.clone();
        sorted.sort_by_key(|entry| std::cmp::Reverse(entry.ends_at()));
        sorted.into_iter().find(|entry| entry.report_date == day)
    }

    /// Same-day entries whose interval overlaps `candidate`.
    #[must_use]
    pub fn overlapping(&self, candidate: &ReportEntry) -> Vec<&ReportEntry> {
        self.on_day(candidate.report_date)
            .filter(|entry| entry.overlaps(candidate))
            .collect()
    }

    /// Sum of all spans.
    #[must_use]
    pub fn total_duration(&self) -> TimeDelta {
        self.0
            .iter()
            .fold(TimeDelta::zero(), |total, entry| total + entry.span)
    }

    /// Time per project, longest first; ties keep first-occurrence order.
    #[must_use]
    pub fn project_hours(&self) -> ProjectsHours {
        let mut hours: Vec<ProjectHours> = Vec::new();

        for entry in &self.0 {
            match hours.iter_mut().find(|ph| ph.project == entry.project) {
                Some(ph) => ph.duration += entry.span,
                None => hours.push(ProjectHours {
                    project: entry.project.clone(),
                    duration: entry.span,
                }),
            }
        }

        hours.sort_by(|a, b| b.duration.cmp(&a.duration));
        ProjectsHours::new(hours)
    }

    /// Contiguous runs of entries sharing a report day, in page order.
    #[must_use]
    pub fn group_by_day(&self) -> Vec<Self> {
        let mut groups: Vec<Vec<ReportEntry>> = Vec::new();

        for entry in &self.0 {
            match groups.last_mut() {
                Some(group) if group.last().is_some_and(|last| last.report_date == entry.report_date) => {
                    group.push(entry.clone());
                }
                _ => groups.push(vec![entry.clone()]),
            }
        }

        groups.into_iter().map(Self).collect()
    }
}

impl Deref for ReportEntries {
    type Target = [ReportEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ReportEntry>> for ReportEntries {
    fn from(entries: Vec<ReportEntry>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a ReportEntries {
    type Item = &'a ReportEntry;
    type IntoIter = std::slice::Iter<'a, ReportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Project totals followed by the days, most recent first.
impl fmt::Display for ReportEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.project_hours())?;

        for group in self.group_by_day().iter().rev() {
            let Some(first) = group.first() else { continue };
            write!(f, "\n\n{}:", first.report_date.format("%A, %-d"))?;
            for entry in group {
                write!(f, "\n  {}", entry.summary_line())?;
            }
        }

        Ok(())
    }
}
