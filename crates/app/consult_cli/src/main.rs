// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::time::Duration;

use clap::Parser;
use cli::{Cli, Commands};
use client::ApiClient;

mod cli;
mod client;
mod commands;
mod logging;
mod render;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();
    let author = args.author.as_deref();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::History {
            limit,
            follow,
            interval_ms,
        } => {
            let api = ApiClient::new(&args.server)?;
            commands::history(&api, *limit, *follow, Duration::from_millis(*interval_ms)).await?;
        }
        Commands::Send {
            body,
            agent,
            in_response_to,
        } => {
            let api = ApiClient::new(&args.server)?;
            commands::send(&api, author, body, *agent, in_response_to.as_deref()).await?;
        }
        Commands::Chat { compact } => {
            let api = ApiClient::new(&args.server)?;
            commands::chat(&api, author, *compact).await?;
        }
    }

    Ok(())
}
