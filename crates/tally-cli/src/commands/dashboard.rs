use crate::cli::GlobalFlags;
use crate::context::{AppContext, today};
use crate::output::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dashboard = ctx.portal.dashboard(today()).await?;
    output(&dashboard, flags.format)
}
