//! Clean room client construction.
//!
//! Responsibilities:
//! - Create a client instance from loaded configuration.
//!
//! Does NOT handle:
//! - Configuration loading (see `cleanroom_config::loader`).
//! - Terminal state management (see `runtime::terminal`).

use anyhow::Result;
use cleanroom_client::CleanRoomClient;
use cleanroom_config::Config;

/// Create a new clean room client from configuration.
pub fn create_client(config: &Config) -> Result<CleanRoomClient> {
    let client = CleanRoomClient::builder()
        .base_url(config.connection.base_url.clone())
        .timeout(config.connection.timeout)
        .max_retries(config.connection.max_retries)
        .build()?;
    Ok(client)
}
