// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use swap_sys::{FormatProbe, SwapConfig, SwapController, SwapStatus, SystemExecutor};
use swap_types::{ActivationRequest, OperationResult};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "swapctl")]
#[command(about = "Inspect, create and activate swap devices")]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the swap format found on a device
    Probe { device: PathBuf },
    /// Write a new swap signature
    Create {
        device: PathBuf,
        #[arg(long, short = 'L')]
        label: Option<String>,
    },
    /// Activate a swap device
    Activate {
        device: PathBuf,
        #[arg(long, short = 'p', allow_negative_numbers = true)]
        priority: Option<i32>,
    },
    /// Deactivate a swap device
    Deactivate { device: PathBuf },
    /// Report whether a device is an active swap area
    Status { device: PathBuf },
    /// List active swap areas
    List,
}

fn print<T: Serialize>(json: bool, value: &T, plain: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        plain();
    }
    Ok(())
}

fn finish(json: bool, result: OperationResult) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    if let Err(message) = result.into_result() {
        bail!(message);
    }
    Ok(())
}

fn probe(config: &SwapConfig, device: &Path, json: bool) -> Result<()> {
    let format = FormatProbe::from_config(config).probe(device)?;

    print(json, &format, || println!("{}: {}", device.display(), format))
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("swap_sys=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SwapConfig::load_or_default(args.config.as_deref())?;
    let controller = SwapController::from_config(&config, SystemExecutor);
    let status = SwapStatus::from_config(&config);

    match args.command {
        Command::Probe { device } => probe(&config, &device, args.json),
        Command::Create { device, label } => {
            finish(args.json, controller.create(&device, label.as_deref()))
        }
        Command::Activate { device, priority } => {
            let mut request = ActivationRequest::new(device);
            if let Some(priority) = priority {
                request = request.with_priority(priority);
            }
            finish(args.json, controller.activate(&request))
        }
        Command::Deactivate { device } => finish(args.json, controller.deactivate(&device)),
        Command::Status { device } => {
            let active = status.is_active(&device)?;
            print(args.json, &active, || {
                println!(
                    "{}: {}",
                    device.display(),
                    if active { "active" } else { "inactive" }
                )
            })
        }
        Command::List => {
            let entries = status.active_entries()?;
            print(args.json, &entries, || {
                println!("DEVICE                         TYPE         SIZE(KiB)   USED(KiB)  PRIO");
                for entry in &entries {
                    println!(
                        "{:<30} {:<10} {:>11} {:>11} {:>5}",
                        entry.device, entry.kind, entry.size_kib, entry.used_kib, entry.priority
                    );
                }
            })
        }
    }
}
