use chrono::{Datelike, NaiveDate};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatArgs;
use crate::context::{AppContext, today};
use crate::output::output;

/// Last month to fetch: the current month for this year, December otherwise.
fn last_month(year: i32, now: NaiveDate) -> u32 {
    if year == now.year() { now.month() } else { 12 }
}

pub async fn handle(args: &StatArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let now = today();
    let year = args.year.unwrap_or_else(|| now.year());

    let stat = ctx.portal.year_stat(year, last_month(year, now)).await?;
    output(&stat, flags.format)
}
