use crate::{
    cmd::env_or_default,
    modules::handlers::{attach_solution, get_contests, get_youtube_videos, liveness},
};
use anyhow::{Context, Result};
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use contest_tracker_libs::{
    adapter::{codeforces::DEFAULT_CODEFORCES_HOST, CodeforcesAdapter},
    solution::JsonFileSolutionStore,
    ContestAggregator, ContestService,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::time::Duration;
use tower_http::cors::CorsLayer;

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let codeforces_host = env_or_default("CODEFORCES_API_URL", DEFAULT_CODEFORCES_HOST);
    let timeout = env_or_default("ADAPTER_TIMEOUT_SECONDS", "10")
        .parse::<u64>()
        .map(Duration::from_secs)
        .with_context(|| {
            let message = "ADAPTER_TIMEOUT_SECONDS must be a number of seconds";
            tracing::error!(message);
            message
        })?;
    let store_path = env_or_default("SOLUTION_STORE_PATH", "solutions.json");

    let codeforces = CodeforcesAdapter::new(&codeforces_host).with_context(|| {
        let message = format!(
            "couldn't create Codeforces adapter. check the value of CODEFORCES_API_URL: {}",
            codeforces_host
        );
        tracing::error!(message);
        message
    })?;
    let aggregator = ContestAggregator::with_default_adapters(codeforces, timeout);
    tracing::info!(
        "{} platform adapters registered with timeout {:?}",
        aggregator.len(),
        timeout
    );

    tracing::info!("Solution links are stored at {}", store_path);
    let store = Arc::new(JsonFileSolutionStore::new(&store_path));
    let service = ContestService::new(aggregator, store);

    let app = create_router(Arc::new(service));
    let port = match args.port {
        Some(port) => port,
        None => {
            tracing::warn!("API server will be launched at default port number 8000");
            8000u16
        }
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::try_bind(&addr)
        .with_context(|| {
            let message = format!("Failed to bind server to {}", addr);
            tracing::error!(message);
            message
        })?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn create_router(service: Arc<ContestService>) -> Router {
    Router::new()
        .route("/api/contests", routing::get(get_contests))
        .route("/api/contests/solution", routing::post(attach_solution))
        .route("/api/youtube", routing::get(get_youtube_videos))
        .route("/api/liveness", routing::get(liveness))
        .layer(Extension(service))
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown.");
}
