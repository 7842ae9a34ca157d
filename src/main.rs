//! item-api server.
//!
//! ```text
//!     Client Request
//!     ───────────────▶ TraceLayer / request ID / timeout / body limit / CORS
//!                          │
//!                          ├── /, /health, /ready          (probes)
//!                          ├── /api/v1/...                  (items)
//!                          └── /apispec.json, /apidocs     (docs, optional)
//!                                   │
//!                                   ▼
//!                              SQLite pool (readiness, records)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use item_api::{AppFactory, Settings, Shutdown};

#[derive(Parser)]
#[command(name = "item-api")]
#[command(about = "RESTful API skeleton with health and readiness probes", long_about = None)]
struct Cli {
    /// Bind host (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Dotenv file to read instead of ./.env.
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.env_file {
        Some(path) => Settings::load_with_env_file(path),
        None => Settings::load(),
    };
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    let app = AppFactory::new().settings(settings).build()?;

    tracing::info!(
        env = %app.settings().flask_env,
        log_level = %app.settings().log_level,
        docs = app.docs_enabled(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(app.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.on_os_signal();

    app.serve(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
