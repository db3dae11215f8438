use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use mathlens_config::MathLensConfig;
use mathlens_gateway::{GatewayState, start_server};
use mathlens_logging::init_logger;
use mathlens_pipeline::Solver;

#[derive(Parser)]
#[command(name = "mathlens")]
#[command(about = "MathLens — photographed math expressions, solved and explained")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MathLens HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check a running server's health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = MathLensConfig::from_env();
    init_logger(&config.log_dir, &config.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = MathLensConfig {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("MathLens is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: MathLensConfig) -> Result<()> {
    info!(%config, "Starting MathLens gateway");

    if !config.has_solve_credentials() {
        tracing::warn!(
            vision = config.has_vision_credential(),
            explain = config.explain.api_key.is_some(),
            "Incomplete model credentials; solve requests will fail with missing_api_key"
        );
    }

    let solver = Arc::new(Solver::from_config(&config));
    let state = GatewayState::new(solver, config.max_image_bytes);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state).await
}
