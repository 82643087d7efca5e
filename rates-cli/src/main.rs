//! Rates CLI
//!
//! Command-line interface for the Exchange Rates API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use rates_client::RatesClient;

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange Rates API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Exchange Rates API
    #[arg(long, env = "RATES_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Fetch today's feed and store new rates
    Fetch,
    /// List all stored rates
    List,
    /// Convert an amount using the latest stored rates
    Convert {
        #[arg(long)]
        amount: f64,
        /// Source currency code (e.g. USD)
        #[arg(long)]
        from: String,
        /// Target currency code (e.g. TRY)
        #[arg(long)]
        to: String,
    },
    /// Save the raw feed XML on the server
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RatesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }
        Commands::Fetch => {
            let resp = client.fetch_rates().await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Commands::List => {
            let rates = client.list_rates().await?;
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }
        Commands::Convert { amount, from, to } => {
            let resp = client.convert(amount, &from, &to).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Commands::Download => {
            let resp = client.download_rates().await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
    }

    Ok(())
}
