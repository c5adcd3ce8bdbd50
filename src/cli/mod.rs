// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Scan vision CLI
#[derive(Parser, Debug)]
#[command(name = "scan-vision")]
#[command(version)]
#[command(about = "Object detection and product lookup for scanned images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect objects in an image file
    Detect(commands::DetectArgs),

    /// Resolve product details for a label
    Lookup(commands::LookupArgs),

    /// List enabled detection providers and product sources
    Providers,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect(args) => commands::detect(args).await,
        Commands::Lookup(args) => commands::lookup(args).await,
        Commands::Providers => commands::providers(),
    }
}
