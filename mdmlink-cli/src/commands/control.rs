//! Device control commands.

use anyhow::Result;
use clap::Args;

use mdmlink_core::Permissions;

use crate::output::{print_ack, print_result};
use crate::{connect_adapter, Cli, QueryArgs};

/// Arguments for the lock command.
#[derive(Args)]
pub struct LockArgs {
    /// Device selection.
    #[command(flatten)]
    pub query: QueryArgs,

    /// Contact number shown on the locked screen.
    #[arg(long)]
    pub phone: String,

    /// Message shown on the locked screen.
    #[arg(long)]
    pub message: String,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Device selection.
    #[command(flatten)]
    pub query: QueryArgs,

    /// Second factor, for vendors that require one.
    #[arg(long)]
    pub password: Option<String>,
}

/// Runs the lock command.
pub async fn run_lock(args: &LockArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(&args.query).await?;
    let receipt = adapter.enable_lost_mode(&args.phone, &args.message).await?;

    print_result(cli, &receipt, || match (receipt.accepted, receipt.command_id) {
        (true, Some(id)) => format!("lock accepted (command {id})"),
        (true, None) => "lock accepted".to_string(),
        (false, _) => "lock failed".to_string(),
    })
}

/// Runs the unlock command.
pub async fn run_unlock(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let receipt = adapter.disable_lost_mode().await?;

    print_result(cli, &receipt, || {
        if receipt.accepted {
            "unlock accepted".to_string()
        } else {
            "unlock failed".to_string()
        }
    })
}

/// Runs the refresh-location command.
pub async fn run_refresh_location(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let acked = adapter.refresh_location().await?;
    print_ack(cli, "refresh-location", acked)
}

/// Runs the supervise command.
pub async fn run_supervise(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    adapter.enable_supervision().await?;
    print_ack(cli, "supervise", true)
}

/// Runs the remove command.
pub async fn run_remove(args: &RemoveArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(&args.query).await?;
    let acked = adapter.remove_mdm(args.password.as_deref()).await?;
    print_ack(cli, "remove", acked)
}

/// Runs the clear-passcode command.
pub async fn run_clear_passcode(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let acked = adapter.remove_password().await?;
    print_ack(cli, "clear-passcode", acked)
}

/// Runs the hide-app command.
pub async fn run_hide_app(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let receipt = adapter.hide_app().await?;

    print_result(cli, &receipt, || match (receipt.accepted, receipt.command_id) {
        (true, Some(id)) => format!("hide-app accepted (command {id})"),
        (true, None) => "hide-app accepted".to_string(),
        (false, _) => "hide-app failed".to_string(),
    })
}

/// Runs the restrict command, pushing the standard restriction set.
pub async fn run_restrict(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let acked = adapter
        .set_permissions(&Permissions::supervision_defaults())
        .await?;
    print_ack(cli, "restrict", acked)
}

/// Runs the proxy-on / proxy-off commands.
pub async fn run_proxy(args: &QueryArgs, cli: &Cli, enable: bool) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let (op, acked) = if enable {
        ("proxy-on", adapter.enable_proxy().await?)
    } else {
        ("proxy-off", adapter.disable_proxy().await?)
    };
    print_ack(cli, op, acked)
}
