use clap::Parser;
use surebet::cli::{self, Cli};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tokio::select! {
        result = cli::run(cli) => {
            if let Err(e) = result {
                eprintln!("✗ {e}");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }
}
