//! supplier-radar CLI entry point
//!
//! Simulated nearby suppliers - CLI + HTTP API

use supplier_radar::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
