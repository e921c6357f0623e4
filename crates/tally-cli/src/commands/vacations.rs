use std::fmt;

use chrono::Datelike;
use serde::Serialize;
use tally_core::{Holidays, Vacations};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::VacationsArgs;
use crate::context::{AppContext, today};
use crate::output::output;

#[derive(Serialize)]
struct BreaksView {
    year: i32,
    vacations: Vacations,
    holidays: Holidays,
}

impl fmt::Display for BreaksView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vacations in {}:", self.year)?;
        if self.vacations.is_empty() {
            writeln!(f, "none")?;
        } else {
            writeln!(f, "{}", self.vacations)?;
        }
        write!(f, "\nHolidays:\n{}", self.holidays)
    }
}

pub async fn handle(args: &VacationsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let year = args.year.unwrap_or_else(|| today().year());
    let (vacations, holidays) = ctx.portal.vacations_holidays(year).await?;

    output(
        &BreaksView {
            year,
            vacations,
            holidays,
        },
        flags.format,
    )
}
