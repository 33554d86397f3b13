//! Wallpaper commands.

use anyhow::Result;
use clap::Args;

use crate::output::{print_ack, print_result};
use crate::{connect_adapter, Cli, QueryArgs};

/// Arguments for the wallpaper-upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// Device selection.
    #[command(flatten)]
    pub query: QueryArgs,

    /// Wallpaper image data (vendor-defined encoding, usually a URL or
    /// base64 blob).
    #[arg(long)]
    pub data: String,
}

/// Arguments for the wallpaper-set command.
#[derive(Args)]
pub struct SetArgs {
    /// Device selection.
    #[command(flatten)]
    pub query: QueryArgs,

    /// Allow the user to change the wallpaper afterwards.
    #[arg(long)]
    pub changeable: bool,

    /// Wallpaper id to push, for vendors that select by id.
    #[arg(long)]
    pub wallpaper_id: Option<i64>,
}

/// Runs the wallpapers command.
pub async fn run_list(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let wallpapers = adapter.get_wallpapers().await?;

    print_result(cli, &wallpapers, || {
        if wallpapers.is_empty() {
            "no wallpapers".to_string()
        } else {
            wallpapers
                .iter()
                .map(|w| format!("{}: {}", w.id, w.url))
                .collect::<Vec<_>>()
                .join("\n")
        }
    })
}

/// Runs the wallpaper-upload command.
pub async fn run_upload(args: &UploadArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(&args.query).await?;
    let acked = adapter.upload_wallpaper(&args.data).await?;
    print_ack(cli, "wallpaper-upload", acked)
}

/// Runs the wallpaper-set command.
pub async fn run_set(args: &SetArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(&args.query).await?;
    let acked = adapter
        .set_wallpaper(args.changeable, args.wallpaper_id)
        .await?;
    print_ack(cli, "wallpaper-set", acked)
}
