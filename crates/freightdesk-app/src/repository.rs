//! Opens the backend adapters from configuration

use freightdesk_infra::{RestClient, Session};
use freightdesk_types::Result;
use tracing::debug;

use crate::config::Config;

/// Open a REST client against the configured backend
pub fn open_rest_client(config: &Config, session: Session) -> Result<RestClient<Session>> {
    debug!(
        base_url = %config.api_base_url,
        timeout_secs = config.request_timeout_secs,
        "opening REST client"
    );
    let client = RestClient::new(config.api_base_url.clone(), config.timeout(), session)?;
    Ok(client)
}
