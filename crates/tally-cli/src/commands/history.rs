use chrono::Datelike;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::context::{AppContext, today};
use crate::output::output;

pub async fn handle(args: &HistoryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let now = today();
    let year = args.year.unwrap_or_else(|| now.year());
    let month = args.month.unwrap_or_else(|| now.month());

    let history = ctx.portal.history(year, month).await?;
    output(&history, flags.format)
}
