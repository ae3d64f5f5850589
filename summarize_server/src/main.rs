mod docs;
mod error;
mod info;
mod middlewares;
mod router;
mod state;
mod summarize;

use std::sync::Arc;

use dotenvy::dotenv;
use router::router;
use state::ServerState;
use summarize_core::helpers::config::ServiceConfig;
use tokio::{net::TcpListener, signal};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env()?;

    let state = Arc::new(ServerState::try_from(&config)?);

    log::info!(
        "Payments go to {} on {}, {} wei per request",
        config.payment.receiver,
        config.payment.network,
        config.payment.price_wei
    );
    if state.summarizer().ai_enabled() {
        log::info!("OpenAI summarization enabled");
    } else {
        log::info!("No OpenAI key configured, using extractive summaries");
    }

    spawn_ledger_pruning(state.clone(), config.prune_interval);

    let app = router(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn spawn_ledger_pruning(state: Arc<ServerState>, period: std::time::Duration) {
    if state.ledger().policy().ttl.is_none() {
        return;
    }

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            state.ledger().prune_expired();
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
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

    log::info!("Shutting down");
}
