//! Walking Guide - Main Entry Point

use anyhow::Context;
use fusion::{ExitReason, Guide};
use guide::{demo, init_logging, load_config, DEFAULT_CONFIG_PATH};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    info!("=== Walking Guide v{} ===", env!("CARGO_PKG_VERSION"));

    let path = std::env::var("GUIDE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path).with_context(|| format!("loading configuration from {}", path))?;
    debug!("Effective configuration: {}", serde_json::to_string(&config)?);

    let collaborators = demo::collaborators(&config.camera);
    let guide = Guide::new(config);
    let flags = guide.flags();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received; shutting down");
                flags.request_stop();
            }
            Err(e) => warn!("Failed to listen for interrupt: {}", e),
        }
    });

    let reason = tokio::task::spawn_blocking(move || guide.run(collaborators))
        .await
        .context("guide task panicked")??;

    match reason {
        ExitReason::UserShutdown | ExitReason::Interrupted => info!("Guide exited: {:?}", reason),
        failure => warn!("Guide stopped on device failure: {:?}", failure),
    }
    Ok(())
}
