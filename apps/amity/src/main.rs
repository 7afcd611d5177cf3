//! # Amity - Relationship Engine CLI
//!
//! The main binary for the Amity relationship graph engine.
//!
//! This application provides operator commands over the engine: member
//! registration, the friendship lifecycle (request/accept/reject/unfriend),
//! blocking, and friend recommendations — all against a redb-backed store.
//!
//! ## Usage
//!
//! ```bash
//! # Register members
//! amity add --id 1 --name Alice --interests jazz,chess
//! amity add --id 2 --name Bob --interests jazz
//!
//! # Friendship lifecycle
//! amity send --from 1 --to 2
//! amity accept --from 1 --to 2
//! amity status --viewer 1 --subject 2
//!
//! # Recommendations
//! amity recommend --member 1 --limit 10
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — AMITY_LOG_FORMAT=json enables machine-parseable
    // output.
    let log_format = std::env::var("AMITY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "amity=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
