use std::net::SocketAddr;
use std::sync::Arc;

use antenna_core::AntennaConfig;
use antenna_process::ProcessRunner;
use antenna_scheduler::Scheduler;
use clap::Parser;
use tracing::{info, warn};

mod app;
mod http;

/// Webhook-triggered command relay.
#[derive(Debug, Parser)]
#[command(name = "antenna-gateway", version, about)]
struct Cli {
    /// Config file (TOML, or YAML by extension). Falls back to
    /// $ANTENNA_CONFIG, then ./antenna.toml.
    #[arg(short, long)]
    config: Option<String>,

    /// Port to listen on, overrides `server.port`.
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind, overrides `server.bind`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "antenna_gateway=info,antenna_scheduler=info,antenna_process=info,antenna_core=info,tower_http=debug"
                    .into()
            }),
        )
        .init();

    let cli = Cli::parse();

    // config errors are fatal
    let mut config = AntennaConfig::load(cli.config.as_deref())?;
    config.validate()?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let scheduler = Scheduler::new(Arc::new(ProcessRunner::new()));
    let state = Arc::new(app::AppState::new(&config, scheduler));
    if state.routes.is_empty() {
        warn!("no routes configured, every request will get a 404");
    } else {
        info!(routes = state.routes.len(), "router configured");
    }
    let router = app::build_router(Arc::clone(&state));

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let pending = state.scheduler.pending_count();
    if pending > 0 {
        warn!(pending, "shutting down with delayed invocations still pending; they will not run");
    }
    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
