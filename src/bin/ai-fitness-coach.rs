// ABOUTME: Server binary for the AI Fitness Coach HTTP API
// ABOUTME: Loads configuration, initializes logging and serves until Ctrl-C
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # AI Fitness Coach Server Binary

use std::sync::Arc;

use ai_fitness_coach::{
    config::ServerConfig, logging, resources::ServerResources, server,
};
use anyhow::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "ai-fitness-coach")]
#[command(about = "AI Fitness Coach - personalized plan generation API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    config.validate()?;

    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config)?);
    server::run(resources).await
}
