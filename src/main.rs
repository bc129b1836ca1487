use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use wanderlust::app::bootstrap;
use wanderlust::infra::{config, logging};
use wanderlust::transport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let store = bootstrap::open_store(config::store_backend()?).await?;
    let app_state = transport::http::AppState::new(store);
    let router = transport::http::create_router(app_state);

    let addr = config::listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    transport::http::serve(listener, router, shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}
