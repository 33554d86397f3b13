//! Device lookup commands.

use anyhow::Result;
use clap::Args;

use crate::output::print_result;
use crate::{connect_adapter, Cli, QueryArgs};

/// Arguments for the detail command.
#[derive(Args)]
pub struct DetailArgs {
    /// Device selection.
    #[command(flatten)]
    pub query: QueryArgs,

    /// Explicit device id, overriding the query's mdm id.
    #[arg(long)]
    pub device_id: Option<i64>,
}

/// Runs the device command.
pub async fn run_device(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let mut adapter = connect_adapter(args).await?;
    let device = adapter.get_device().await?;

    match &device {
        Some(found) => print_result(cli, found, || {
            format!(
                "{} (id {}, status {:?}, model {})",
                found.serial_number,
                found.id,
                found.device_status,
                if found.phone_model.is_empty() {
                    "unknown"
                } else {
                    found.phone_model.as_str()
                }
            )
        }),
        None => print_result(cli, &device, || "no device found".to_string()),
    }
}

/// Runs the detail command.
pub async fn run_detail(args: &DetailArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(&args.query).await?;
    let detail = adapter.get_device_detail(args.device_id).await?;

    match &detail {
        Some(found) => print_result(cli, found, || {
            format!(
                "device {}: imei {}, number {}",
                found.id,
                found.imei.as_deref().unwrap_or("unknown"),
                found.phone_number.as_deref().unwrap_or("unknown"),
            )
        }),
        None => print_result(cli, &detail, || "no detail available".to_string()),
    }
}

/// Runs the escrow-key command.
pub async fn run_escrow_key(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let key = adapter.get_escrow_key().await?;

    print_result(cli, &key, || {
        key.clone().unwrap_or_else(|| "no escrow key".to_string())
    })
}

/// Runs the history command.
pub async fn run_history(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let commands = adapter.get_operation_history().await?;

    print_result(cli, &commands, || {
        if commands.is_empty() {
            "no tracked commands".to_string()
        } else {
            commands
                .iter()
                .map(|c| format!("{}: {} ({:?})", c.id, c.command_name, c.do_it))
                .collect::<Vec<_>>()
                .join("\n")
        }
    })
}

/// Runs the locations command.
pub async fn run_locations(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let locations = adapter.get_locations().await?;

    print_result(cli, &locations, || {
        if locations.is_empty() {
            "no locations recorded".to_string()
        } else {
            locations
                .iter()
                .map(|l| format!("{}, {}", l.lat, l.lng))
                .collect::<Vec<_>>()
                .join("\n")
        }
    })
}
