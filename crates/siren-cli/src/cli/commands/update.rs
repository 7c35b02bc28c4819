//! Update command handler.

use anyhow::{Context, Result};
use siren_core::config::Config;
use siren_core::gateway::GatewayClient;
use siren_core::update::version_is_newer;

/// One-shot check of the gateway's release endpoint.
pub async fn check(config: &Config) -> Result<()> {
    let client = GatewayClient::new(&config.gateway).context("create gateway client")?;
    let release = client.fetch_release().await.context("fetch release")?;

    if version_is_newer(&release.version, siren_core::APP_VERSION) {
        if release.update_message.is_empty() {
            println!("Update available: {}", release.version);
        } else {
            println!(
                "Update available: {} - {}",
                release.version, release.update_message
            );
        }
    } else {
        println!("Up to date ({}).", siren_core::APP_VERSION);
    }
    Ok(())
}
