//! # Patch Audit CLI
//!

use clap::Parser;
use log::{error, info};

use paudit_core::prelude::*;

mod banner;
mod commands;

/// Single-host patch compliance report for SUSE/Oracle-derived systems.
///
/// Prints the host identity and the most critical pending security patch
/// with its 180-day remediation deadline.
#[derive(Debug, Parser)]
#[command(name = "paudit", version, about)]
struct Cli {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("{}", banner::LOGO);

    let config = AuditConfig::load().map_err(|e| {
        error!("configuration rejected: {}", e);
        format!("Configuration failed: {}", e)
    })?;

    let runner = commands::create_suse_command_runner();

    // Phase 1: host identity
    info!("collecting host identity");
    let host = HostCollector::new(&runner, config.host)
        .collect()
        .map_err(|e| {
            error!("host collection failed: {}", e);
            format!("Host collection failed: {}", e)
        })?;
    println!("{}", host.format_report());

    // Phase 2: pending patch status
    info!("collecting patch status");
    let patch = PatchCollector::new(&runner, config.patch)
        .collect()
        .map_err(|e| {
            error!("patch collection failed: {}", e);
            format!("Patch collection failed: {}", e)
        })?;
    match patch.patch_id() {
        Some(id) => info!("most critical pending patch: {}", id),
        None => info!("no critical security patches pending"),
    }
    println!("{}", patch.format_report());

    Ok(())
}
