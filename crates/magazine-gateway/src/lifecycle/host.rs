//! Runs the HTTP host on top of the magazine system.

use super::magazine_system::{MagazineSystem, ShutdownReport};
use super::state::GatewayLifecycle;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Starts the magazine system, serves HTTP on `listener` until `shutdown` is
/// cancelled, then tears the actor system down.
///
/// Cancelling the token moves the gateway to `Stopping` immediately, so the status
/// endpoint reports `Down` while in-flight requests drain.
pub async fn serve(
    config: GatewayConfig,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> Result<ShutdownReport, GatewayError> {
    let address = listener.local_addr()?;
    let lifecycle = GatewayLifecycle::new();
    let system = MagazineSystem::start_with(&config.actor_system, lifecycle.clone())?;
    let router = http::build_router(http::AppState::new(&system, &config), &config);

    info!(%address, environment = %config.environment, "Starting HTTP server");

    let stopping = lifecycle.clone();
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            stopping.begin_stopping();
        })
        .await;

    finish(system, config.server.shutdown_timeout(), served).await
}

/// Tears the actor system down after the server exited, cleanly or not. A server
/// error wins over the shutdown result.
async fn finish(
    system: MagazineSystem,
    timeout: Duration,
    served: io::Result<()>,
) -> Result<ShutdownReport, GatewayError> {
    let report = system.shutdown(timeout).await;
    match served {
        Ok(()) => {
            info!("HTTP server stopped");
            report
        }
        Err(e) => {
            error!(error = %e, "HTTP server failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::GatewayState;

    #[tokio::test]
    async fn test_server_error_still_terminates_actors() {
        let system = MagazineSystem::start(&GatewayConfig::default().actor_system).unwrap();
        let lifecycle = system.lifecycle().clone();
        let query = system.query().clone();

        let result = finish(
            system,
            Duration::from_secs(5),
            Err(io::Error::new(io::ErrorKind::AddrInUse, "listener lost")),
        )
        .await;

        assert!(matches!(result, Err(GatewayError::Io(_))));
        assert_eq!(lifecycle.current(), GatewayState::Terminated);
        assert!(query.router().is_stopped());
    }

    #[tokio::test]
    async fn test_clean_exit_returns_report() {
        let system = MagazineSystem::start(&GatewayConfig::default().actor_system).unwrap();
        let report = finish(system, Duration::from_secs(5), Ok(())).await.unwrap();
        assert_eq!(report.steps.len(), 3);
    }
}
