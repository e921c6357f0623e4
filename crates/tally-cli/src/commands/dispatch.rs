use tally_config::TallyConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
///
/// `login` and `config` work on the configuration alone; everything else
/// needs a configured domain and a stored session.
pub async fn dispatch(
    command: Commands,
    mut config: TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => return commands::login::handle(&args, &mut config, flags).await,
        Commands::Config { action } => return commands::config::handle(&action, &mut config, flags),
        _ => {}
    }

    let ctx = AppContext::init(config)?;
    match command {
        Commands::Dashboard => commands::dashboard::handle(&ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, &ctx, flags).await,
        Commands::Report(args) => commands::report::handle(&args, &ctx, flags).await,
        Commands::Projects => commands::projects::handle(&ctx, flags).await,
        Commands::Vacations(args) => commands::vacations::handle(&args, &ctx, flags).await,
        Commands::Birthdays => commands::birthdays::handle(&ctx, flags).await,
        Commands::User(args) => commands::user::handle(&args, &ctx, flags).await,
        Commands::Stat(args) => commands::stat::handle(&args, &ctx, flags).await,
        Commands::Login(_) | Commands::Config { .. } => {
            unreachable!("login/config are dispatched before the portal context is built")
        }
    }
}
