//! Read-only views composed from several fetched records.

mod month_info;
mod year_stat;

pub use month_info::MonthInfo;
pub use year_stat::{GroupedEntries, YearStat};
