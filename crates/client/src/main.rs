//! Grid tactics terminal client.
//!
//! ```bash
//! TACTICS_SCENARIO=crates/game/content/data/scenarios/skirmish.ron cargo run -p tactics-client
//! ```

use anyhow::Result;
use tactics_client::{App, BattleBuilder, ClientConfig, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir)?;

    tracing::info!("Starting tactics client");
    tracing::debug!(?config, "client configuration");

    let manager = BattleBuilder::from_config(&config).build()?;
    let result = App::new(config, manager).run().await;

    if let Err(e) = &result {
        tracing::error!("client stopped: {e:#}");
    }
    result
}
