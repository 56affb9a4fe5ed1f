//! Fixture server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::Env;
use fixture_core::{AppConfig, FixtureBuffer};
use fixture_server::{AppState, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// fixtured - an HTTP test-fixture server for download clients
#[derive(Parser, Debug)]
#[command(name = "fixtured")]
#[command(version, about, long_about = None)]
struct Args {
    /// Bind address (overrides FIXTURE_SERVER__BIND)
    #[arg(short, long, env = "FIXTURE_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("fixtured v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration. Defaults cover everything; FIXTURE_ environment
    // variables override individual fields. There is no config file.
    let mut config: AppConfig = Figment::new()
        .merge(Env::prefixed("FIXTURE_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    if let Err(error) = config.validate() {
        anyhow::bail!("invalid configuration: {error}");
    }

    // Generate the fixture payload once; it is immutable for the rest of
    // the process lifetime.
    tracing::info!(
        buffer_len = config.fixture.buffer_len,
        "Generating fixture buffer"
    );
    let buffer = FixtureBuffer::generate(config.fixture.buffer_len_usize());

    // Create application state and router
    let state = AppState::new(config.clone(), buffer);
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    // Readiness signal: clients wait for this line before issuing requests.
    tracing::info!(addr = %addr, "Ready!");

    axum::serve(listener, app).await?;

    Ok(())
}
