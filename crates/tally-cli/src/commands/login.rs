use std::fmt;

use anyhow::Context;
use serde::Serialize;
use tally_config::{SessionConfig, TallyConfig};
use tally_portal::PortalClient;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    domain: String,
    config_path: String,
}

impl fmt::Display for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Logged in to {}; session saved to {}",
            self.domain, self.config_path
        )
    }
}

pub async fn handle(
    args: &LoginArgs,
    config: &mut TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let portal = config
        .require_portal()
        .context("no portal configured; run 'tly config set-domain <host>' first")?;
    let domain = portal.domain.clone();

    let client = PortalClient::new(&domain, portal.timeout())?;
    let session = client
        .login(&args.username, &args.password)
        .await
        .with_context(|| format!("login to {domain} failed"))?;

    config.session = SessionConfig {
        csrftoken: session.csrf_token().to_string(),
        sessionid: session.session_id().to_string(),
    };
    let path = config.save_user().context("failed to save session")?;

    output(
        &LoginResponse {
            authenticated: true,
            domain,
            config_path: path.display().to_string(),
        },
        flags.format,
    )
}
