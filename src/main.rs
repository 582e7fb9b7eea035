use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voltboard::{
    cli::{run_analyze, Cli, Commands},
    config::ServerConfig,
    router,
    state::ServerState,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voltboard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze { file }) => {
            return run_analyze(&file).map_err(|e| e.into());
        }
        Some(Commands::Serve) | None => {
            // Continue to run server
        }
    }

    // Load configuration
    let config = ServerConfig::from_env()?;

    info!("🚀 Starting voltboard v{}", VERSION);
    info!("📋 Configuration loaded:");
    info!("   Port: {}", config.port);
    info!("   Bind address: {}", config.bind_addr);
    info!("   Voltage data file: {:?}", config.data_path);
    info!("   Acceleration log: {:?}", config.accel_log_path);

    // Create server state
    let state = Arc::new(ServerState::new(config.clone())?);
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("🎧 Listening on http://{}", addr);
    info!("📈 Dashboard endpoint: http://{}/", addr);
    info!("🔑 Health endpoint: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
