mod onboard;
mod resolve;
mod seed;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tureen_core::ApiClient;

#[derive(Parser)]
#[command(name = "tureen")]
#[command(about = "Tureen CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the server (unauthenticated)
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Seed the database with a user, an ingredient catalog, dish
    /// categories, and a demo restaurant
    Seed {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        /// Username for the seed user
        #[arg(long)]
        username: String,
        /// Password for the seed user
        #[arg(long)]
        password: String,
    },
    /// Onboard a restaurant from a JSON bundle: dishes are staged through
    /// the wizard flow and written only once the restaurant exists
    Onboard {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        /// Username of the restaurant owner
        #[arg(long)]
        username: String,
        /// Password of the restaurant owner
        #[arg(long)]
        password: String,
        /// Path to the onboarding bundle (JSON)
        #[arg(long)]
        bundle: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ping { server } => {
            ping(&server).await?;
        }
        Commands::Seed {
            server,
            username,
            password,
        } => {
            seed::seed(&server, &username, &password).await?;
        }
        Commands::Onboard {
            server,
            username,
            password,
            bundle,
        } => {
            onboard::onboard(&server, &username, &password, &bundle).await?;
        }
    }

    Ok(())
}

async fn ping(server: &str) -> Result<()> {
    let client = ApiClient::new(server)?;
    let message = client.unauthed_ping().await?;
    println!("{}", message);
    Ok(())
}
