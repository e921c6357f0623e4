use anyhow::Context;
use chrono::{Local, NaiveDate};
use tally_config::TallyConfig;
use tally_portal::{PortalClient, Session};

/// Configuration plus an authenticated portal client.
pub struct AppContext {
    pub config: TallyConfig,
    pub portal: PortalClient,
}

impl AppContext {
    /// Build the portal client from the configured domain and stored session.
    pub fn init(config: TallyConfig) -> anyhow::Result<Self> {
        let portal = config
            .require_portal()
            .context("no portal configured; run 'tly config set-domain <host>' first")?;
        let session = config
            .require_session()
            .context("not logged in; run 'tly login' first")?;

        let client = PortalClient::new(&portal.domain, portal.timeout())?
            .with_session(Session::new(&session.csrftoken, &session.sessionid));
        tracing::debug!(base_url = client.base_url(), "portal client ready");

        Ok(Self {
            config,
            portal: client,
        })
    }
}

/// Local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
