//! # Magazine Gateway
//!
//! Entry point of the gateway process:
//!
//! 1. Loads [`GatewayConfig`] from `appsettings.json`, `appsettings.{env}.json` and
//!    `MAGAZINE__*` environment variables.
//! 2. Installs tracing.
//! 3. Serves HTTP until Ctrl+C or SIGTERM, then shuts the actor system down.

use magazine_gateway::config::GatewayConfig;
use magazine_gateway::lifecycle::{init_tracing, serve};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::load()?;
    init_tracing(&config.logging)?;

    let address = config.server.bind_address()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, environment = %config.environment, "Magazine gateway listening");

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let report = serve(config, listener, shutdown).await?;
    info!(steps = ?report.steps, elapsed = ?report.elapsed, "Magazine gateway stopped");
    Ok(())
}

async fn cancel_on_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
    shutdown.cancel();
}
