use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UserArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &UserArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let person = ctx
        .portal
        .person_info(args.id)
        .await
        .with_context(|| format!("failed to load user {}", args.id))?;
    output(&person, flags.format)
}
