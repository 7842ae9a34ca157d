use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "api-cli")]
#[command(about = "Probe and exercise a running item-api", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liveness probe
    Health,
    /// Readiness probe (exits non-zero when not ready)
    Ready,
    /// API version and endpoints
    Info,
    /// List items
    Items {
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        per_page: i64,
    },
    /// Fetch one item
    Item { id: i64 },
    /// Create an item
    Create { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Ready => client.get(format!("{}/ready", base)).send().await?,
        Commands::Info => client.get(format!("{}/api/v1/", base)).send().await?,
        Commands::Items { page, per_page } => {
            client
                .get(format!("{}/api/v1/items", base))
                .query(&[("page", page), ("per_page", per_page)])
                .send()
                .await?
        }
        Commands::Item { id } => {
            client
                .get(format!("{}/api/v1/items/{}", base, id))
                .send()
                .await?
        }
        Commands::Create { name } => {
            client
                .post(format!("{}/api/v1/items", base))
                .json(&json!({ "name": name }))
                .send()
                .await?
        }
    };

    if !print_response(res).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the body; returns whether the status was a success.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    Ok(status.is_success())
}
