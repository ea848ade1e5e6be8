use apps_host_probe::mcp::state::AppState;
use apps_host_probe::router::create_app_router;
use apps_host_probe::transport::{stdio, LogMode, TransportKind};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Conformance probe server for MCP Apps hosts
#[derive(Parser, Debug)]
#[command(name = "apps-host-probe", version, about)]
struct Args {
    /// Transport to serve on; detected from stdin when omitted
    #[arg(long, value_enum)]
    transport: Option<TransportKind>,

    /// Port for the HTTP transport
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Log filter applied when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let transport = args.transport.unwrap_or_else(TransportKind::detect);

    // Under the stdio transport every diagnostic stays off; stdout carries
    // protocol frames and stderr belongs to the embedding host.
    let log_mode = match transport {
        TransportKind::Http => LogMode::Stderr,
        TransportKind::Stdio => LogMode::Silent,
    };

    if log_mode == LogMode::Stderr {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
            )
            .init();
    }

    // Initialize application state
    let state = Arc::new(AppState::new());

    match transport {
        TransportKind::Http => {
            // Build application router with all routes and middleware
            let app = create_app_router(state);

            // Configure the server address
            let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
            tracing::info!("Server running on http://{}", addr);

            // Start the server
            let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
            axum::serve(listener, app).await.unwrap();
        }
        TransportKind::Stdio => {
            if let Err(e) = stdio::serve(state).await {
                tracing::error!("stdio transport failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
