mod device;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nearbrew-cli")]
#[command(about = "Find coffee near a postal code or the device location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for coffee places and print the ranked results
    Search {
        /// Search around this postal code instead of the device location
        #[arg(long)]
        postal_code: Option<String>,

        /// Print the final snapshot as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Report the location service's state and one bounded fix attempt
    Locate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = nearbrew_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search { postal_code, json } => {
            let pipeline = search::build_pipeline(&config)?;
            search::run(pipeline, postal_code.as_deref(), json).await
        }
        Commands::Locate => device::run_locate(&config).await,
    }
}
