//! # tally-core
//!
//! Domain types and the time-report engine for tally.
//!
//! Nothing in this crate performs I/O. It provides:
//! - Entity structs for every record scraped from the portal (salary, people,
//!   projects, holidays, vacations, report entries)
//! - The activity enum and its portal codes
//! - The report engine: draft validation, project resolution, time alignment
//!   and overlap detection
//! - Pure aggregation views (project hours, month overview, year statistics)
//! - Span parsing/formatting helpers and their serde adapters

pub mod entities;
pub mod enums;
pub mod errors;
pub mod report;
pub mod span;
pub mod views;

pub use entities::{
    Birthday, Holiday, Holidays, Person, Persons, Project, ProjectHours, Projects,
    ProjectsHours, ReportEntries, ReportEntry, Salaries, Salary, Vacation, Vacations,
};
pub use enums::Activity;
pub use errors::{Bound, ReportError};
pub use report::{ReportDraft, TimeSpec, check_range, check_status};
pub use views::{GroupedEntries, MonthInfo, YearStat};
