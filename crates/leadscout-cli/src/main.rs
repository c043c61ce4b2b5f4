mod proxies;
mod search;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "leadscout-cli")]
#[command(about = "Lead acquisition and validation toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search configured directory sources for businesses.
    Search {
        query: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        /// Keep every extracted contact instead of only the primary one.
        #[arg(long)]
        all_contacts: bool,
        /// Emit the raw result set as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate a JSON file containing an array of leads.
    Validate {
        file: PathBuf,
        /// Emit full per-lead results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Administer the proxy pool of a running leadscout server.
    Proxies {
        /// Base URL of the server.
        #[arg(long, env = "LEADSCOUT_API_URL", default_value = "http://127.0.0.1:3000")]
        server: String,
        /// Bearer token for protected deployments.
        #[arg(long, env = "LEADSCOUT_API_KEY")]
        api_key: Option<String>,
        #[command(subcommand)]
        command: proxies::ProxiesCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            query,
            location,
            limit,
            all_contacts,
            json,
        } => search::run(&query, location.as_deref(), limit, all_contacts, json).await,
        Commands::Validate { file, json } => validate::run(&file, json),
        Commands::Proxies {
            server,
            api_key,
            command,
        } => proxies::run(command, &server, api_key.as_deref()).await,
    }
}
