// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::VisionConfig;
use crate::VisionServices;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Path to the image file
    pub image: PathBuf,

    /// Also resolve product details for the top detected object
    #[arg(long)]
    pub lookup_top: bool,
}

/// Arguments for the lookup command
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Label to resolve (e.g. "banana")
    pub label: String,
}

fn load_services() -> Result<(VisionServices, VisionConfig)> {
    let config = VisionConfig::from_env();
    config.validate().map_err(|e| anyhow!(e))?;
    if !config.has_any_provider() {
        warn!("No detection provider credentials set, only the fallback will answer");
    }
    Ok((VisionServices::from_config(&config)?, config))
}

pub async fn detect(args: DetectArgs) -> Result<()> {
    let (services, _) = load_services()?;
    let outcome = services.detection.detect_path(&args.image).await;
    info!(
        "{} objects from {} (confidence {:.1}, categories: {})",
        outcome.objects.len(),
        outcome.provider,
        outcome.confidence,
        outcome.categories().join(", ")
    );

    let product = match (args.lookup_top, outcome.top_object()) {
        (true, Some(top)) => Some(services.enrichment.get_product_details(&top.name).await),
        _ => None,
    };

    let output = json!({
        "detection": outcome,
        "product": product,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub async fn lookup(args: LookupArgs) -> Result<()> {
    let (services, _) = load_services()?;
    let detail = services.enrichment.get_product_details(&args.label).await;
    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

pub fn providers() -> Result<()> {
    let (services, config) = load_services()?;
    let output = json!({
        "remoteDetection": config.has_any_provider(),
        "detectionProviders": services.detection.available_providers(),
        "productSources": services.enrichment.available_sources(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
