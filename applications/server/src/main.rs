/// Pinpoint Server - user records with resolved locations
use clap::{Parser, Subcommand};
use pinpoint_server::{api, config::ServerConfig, state, AppState};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pinpoint-server")]
#[command(about = "Pinpoint user record server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "PINPOINT_CONFIG")]
        config: Option<PathBuf>,
    },
    /// List all stored users
    ListUsers {
        /// Configuration file path
        #[arg(short, long, env = "PINPOINT_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Resolve a postal code and print its location
    Resolve {
        /// US postal code, e.g. 10001
        zip_code: String,

        /// Configuration file path
        #[arg(short, long, env = "PINPOINT_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinpoint_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(load_config(config)?).await?;
        }
        Commands::ListUsers { config } => {
            list_users(ServerConfig::load(config.as_deref())?).await?;
        }
        Commands::Resolve { zip_code, config } => {
            resolve(load_config(config)?, &zip_code).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Pinpoint Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Storage: {:?}", config.storage.backend);

    let app_state = AppState::from_config(&config).await?;
    app_state.users.ping_store().await?;
    tracing::info!("Storage reachable");

    let app = api::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let store = state::open_store(&config.storage).await?;
    let users = store.get_all().await?;

    println!("Users ({}):", users.len());
    for user in users {
        println!(
            "  {} - {} ({}, {:.4}, {:.4}, {})",
            user.id, user.name, user.zip_code, user.latitude, user.longitude, user.timezone
        );
    }

    Ok(())
}

async fn resolve(config: ServerConfig, zip_code: &str) -> anyhow::Result<()> {
    let resolver = state::open_resolver(&config)?;
    let location = resolver.resolve(zip_code).await?;

    println!("Zip code:  {}", zip_code);
    println!("Latitude:  {}", location.latitude);
    println!("Longitude: {}", location.longitude);
    println!("Timezone:  {}", location.timezone);

    Ok(())
}
