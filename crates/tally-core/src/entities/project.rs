use std::fmt;
use std::ops::Deref;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::errors::ReportError;
use crate::span::{self, format_span};

/// A project reports can be logged against. Identity is `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    /// A project known only by the name a user typed.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
        }
    }
}

/// The project catalog as listed on the report page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projects(Vec<Project>);

impl Projects {
    #[must_use]
    pub const fn new(projects: Vec<Project>) -> Self {
        Self(projects)
    }

    /// Find the single project whose name contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// - [`ReportError::ProjectNotFound`] when nothing matches.
    /// - [`ReportError::TooPermissive`] when more than one project matches;
    ///   the catalog is never guessed from.
    pub fn find(&self, query: &str) -> Result<&Project, ReportError> {
        let needle = query.to_lowercase();
        let matched: Vec<&Project> = self
            .0
            .iter()
            .filter(|project| project.name.to_lowercase().contains(&needle))
            .collect();

        match matched.as_slice() {
            [] => Err(ReportError::ProjectNotFound(query.to_string())),
            [single] => Ok(single),
            many => Err(ReportError::TooPermissive {
                query: query.to_string(),
                matches: many.iter().map(|p| p.name.clone()).collect(),
            }),
        }
    }
}

impl Deref for Projects {
    type Target = [Project];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Project>> for Projects {
    fn from(projects: Vec<Project>) -> Self {
        Self(projects)
    }
}

impl fmt::Display for Projects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|p| p.name.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Time logged against one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHours {
    pub project: Project,
    #[serde(with = "span::minutes")]
    pub duration: TimeDelta,
}

/// Per-project totals, longest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectsHours(Vec<ProjectHours>);

impl ProjectsHours {
    #[must_use]
    pub const fn new(hours: Vec<ProjectHours>) -> Self {
        Self(hours)
    }
}

impl Deref for ProjectsHours {
    type Target = [ProjectHours];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ProjectsHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|ph| format!("{} ({})", ph.project.name, format_span(ph.duration)))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
