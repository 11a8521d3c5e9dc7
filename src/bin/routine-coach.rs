// ABOUTME: Server binary for the Routine Coach web form and API
// ABOUTME: Loads configuration, verifies the Gemini credential, and starts the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Routine Coach Server Binary
//!
//! Refuses to start without `GEMINI_API_KEY` unless `--offline` is given.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use routine_coach::{
    config::ServerConfig,
    llm::{GeminiProvider, LlmProvider},
    logging,
    resources::ServerResources,
    server,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "routine-coach")]
#[command(about = "Routine Coach - workout routine recommender with PDF export")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Start without a Gemini API key; routine generation is disabled
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Routine Coach");
    info!("{}", config.summary());

    let provider: Option<Arc<dyn LlmProvider>> = if args.offline {
        warn!("Running offline: routine generation is disabled");
        None
    } else {
        match GeminiProvider::from_config(&config.gemini) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                error!("{}", e.message);
                return Err(e.into());
            }
        }
    };

    let resources = Arc::new(ServerResources::from_config(&config, provider));
    server::run(resources, config.http_port).await
}
