//! Records scraped from the portal.
//!
//! Every record is a flat snapshot created fresh from one parsed page; none
//! of them is cached or mutated after extraction.

mod holiday;
mod person;
mod project;
mod report_entry;
mod salary;
mod vacation;

pub use holiday::{Holiday, Holidays};
pub use person::{Birthday, Person, Persons};
pub use project::{Project, ProjectHours, Projects, ProjectsHours};
pub use report_entry::{ReportEntries, ReportEntry};
pub use salary::{Salaries, Salary};
pub use vacation::{Vacation, Vacations};
