//! REST API server for the enrollment service.
//!
//! Builds the store, hands it to the runtime thread, and serves the REST
//! API until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use enrollment_api::{router::Router, server::Server};
use enrollment_core::config::{StoreConfig, DEFAULT_COURSE_CAPACITY};
use enrollment_core::EnrollmentStore;
use enrollment_runtime::Runtime;

/// Command-line arguments for the enrollment server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Tick rate for runtime loop (Hz, 15-120)
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(15..=120))]
    tickrate: u32,

    /// Maximum number of students per course
    #[arg(long, default_value_t = DEFAULT_COURSE_CAPACITY)]
    course_capacity: usize,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Response timeout in milliseconds
    #[arg(long, default_value_t = 10000)]
    response_timeout_ms: u64,

    /// Start with an empty store instead of fixture data
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StoreConfig {
        course_capacity: args.course_capacity,
        tickrate: args.tickrate,
        request_timeout_ms: args.request_timeout_ms,
        response_timeout_ms: args.response_timeout_ms,
        seed_on_startup: !args.no_seed,
        ..Default::default()
    };

    let mut store = EnrollmentStore::with_config(&config);
    if config.seed_on_startup {
        store.seed();
    }

    // Runtime thread is the only owner of the store
    let (api_tx, api_rx) = mpsc::channel(1000);
    let mut runtime = Runtime::new(store, config.clone(), api_rx);
    thread::Builder::new()
        .name("enrollment-runtime".to_string())
        .spawn(move || runtime.run())
        .context("Failed to spawn runtime thread")?;

    let router = Router::new(Arc::new(config.clone()), api_tx);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;
    let server = Server::new(addr, router);

    tracing::info!(
        host = %args.host,
        port = args.port,
        tickrate = config.tickrate,
        course_capacity = config.course_capacity,
        seeded = config.seed_on_startup,
        "Starting enrollment server"
    );

    let mut server_handle = tokio::spawn(server.serve());

    tokio::select! {
        result = &mut server_handle => {
            result.context("Server task panicked")??;
        }
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl_c")?;
            tracing::info!("Shutting down server...");
            server_handle.abort();
        }
    }

    Ok(())
}
