//! Demo server binary.
//!
//! Registers two example routes and serves them forever on a
//! current-thread runtime: all accepts, reads, writes, and handler calls
//! run on one event loop thread.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oneshot_http::config::{load_config, ServerConfig};
use oneshot_http::net::Listener;
use oneshot_http::{HttpServer, Request, Response};

#[derive(Parser)]
#[command(name = "oneshot-http")]
#[command(about = "Minimal one-request-per-connection HTTP server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("oneshot_http={}", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        port = config.listener.port,
        "Configuration loaded"
    );

    let addr = config.listener.socket_addr()?;
    let mut server = HttpServer::new(config);

    server.add_route("/", |_req: &Request, resp: &mut Response| {
        resp.append_chunk("<h1>oneshot-http</h1>\n");
    })?;
    server.add_route("/hello(/.*)?", |req: &Request, resp: &mut Response| {
        resp.set_header("Content-Type", "text/plain");
        resp.append_chunk(format!("hello from {}\n", req.path()));
    })?;

    let listener = Listener::bind(addr)?;
    server.run(listener).await?;
    Ok(())
}
