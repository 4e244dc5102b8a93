use powerup::{router, Config, ErasedError, PowerService};

use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), ErasedError> {
    pretty_env_logger::init_timed();

    info!("powerup version {VERSION}");

    let config = Config::from_env()?;
    let sender = config.sender();

    info!(
        "loaded {} devices, broadcasting to {}:{}, probing with {:?}",
        config.registry.len(),
        config.broadcast,
        config.wake_port,
        config.prober
    );

    let Config {
        listen_address,
        registry,
        prober,
        probe_timeout,
        ..
    } = config;

    let service = Arc::new(PowerService::new(registry, prober, sender, probe_timeout));

    let listener = TcpListener::bind(listen_address).await?;
    info!("Listening http://{}", listen_address);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown())
        .await?;

    Ok(())
}

async fn shutdown() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(err) => {
            error!("unable to listen for SIGTERM: {err}");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("got SIGTERM, exiting..."),
        _ = tokio::signal::ctrl_c() => info!("got SIGINT, exiting..."),
    }
}
