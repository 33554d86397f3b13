// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! mdmlink CLI - vendor MDM device control from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Look up a device
//! mdmlink device --brand apple --serial F2LXK123 --application-id app-7
//!
//! # Lock it in lost mode
//! mdmlink lock --brand apple --serial F2LXK123 --application-id app-7 \
//!     --mdm-id 42 --phone 13800000000 --message "Return for reward"
//!
//! # Location history, JSON output
//! mdmlink locations --brand android-seekdream --serial ABC123 \
//!     --application-id app-7 --mdm-id 310 --format json
//!
//! # Remaining merchant credit
//! mdmlink credit --brand apple --serial "" --application-id app-7 \
//!     --mdm-id 42 --merchant-id M1
//!
//! # List vendor backends
//! mdmlink vendors
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mdmlink_core::{Brand, DeviceQuery, Mdm};
use mdmlink_store::{Settings, TokenCache};

// ============================================================================
// CLI Definition
// ============================================================================

/// mdmlink CLI - vendor MDM device control.
#[derive(Parser)]
#[command(name = "mdmlink")]
#[command(about = "Unified MDM device control CLI")]
#[command(long_about = r#"
mdmlink issues device-lifecycle commands against vendor MDM backends
through one uniform interface.

Supported vendors:
  • ishalou Apple MDM (apple)
  • generic Android MDM (android)
  • seekdream Android MDM (android-seekdream)

Vendor endpoints and credentials come from MDM_ISHALOU_*, MDM_ANDROID_*,
and MDM_SEEKDREAM_* environment variables.
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Device selection shared by every device-facing command.
#[derive(Args)]
pub struct QueryArgs {
    /// Vendor brand (apple, android, android-seekdream).
    #[arg(long)]
    pub brand: String,

    /// Device serial number.
    #[arg(long)]
    pub serial: String,

    /// Application/tenant identifier.
    #[arg(long)]
    pub application_id: String,

    /// Vendor-internal device id, when already known.
    #[arg(long)]
    pub mdm_id: Option<i64>,

    /// Merchant identifier, required for credit lookups.
    #[arg(long)]
    pub merchant_id: Option<String>,
}

impl QueryArgs {
    /// Builds the device query, rejecting unknown brands.
    pub fn to_query(&self) -> Result<DeviceQuery> {
        let brand: Brand = self.brand.parse()?;
        let mut query = DeviceQuery::new(brand, self.serial.clone(), self.application_id.clone());
        query.mdm_id = self.mdm_id;
        query.merchant_id = self.merchant_id.clone();
        Ok(query)
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Look up the device matching the query.
    #[command(visible_alias = "d")]
    Device(QueryArgs),

    /// Fetch per-device hardware identifiers.
    Detail(commands::device::DetailArgs),

    /// Fetch the passcode escrow key.
    EscrowKey(QueryArgs),

    /// Lock the device in lost mode.
    Lock(commands::control::LockArgs),

    /// Release the lost-mode lock.
    Unlock(QueryArgs),

    /// Ask the vendor to re-sync the device location.
    RefreshLocation(QueryArgs),

    /// Fetch recent device locations.
    #[command(visible_alias = "loc")]
    Locations(QueryArgs),

    /// Run the supervision enrollment sequence.
    Supervise(QueryArgs),

    /// Unenroll the device from management.
    Remove(commands::control::RemoveArgs),

    /// Clear the device passcode.
    ClearPasscode(QueryArgs),

    /// Hide the management app.
    HideApp(QueryArgs),

    /// Push the standard restriction set.
    Restrict(QueryArgs),

    /// Install the managed HTTP proxy.
    ProxyOn(QueryArgs),

    /// Remove the managed HTTP proxy.
    ProxyOff(QueryArgs),

    /// List wallpapers registered for the device.
    Wallpapers(QueryArgs),

    /// Upload wallpaper image data.
    WallpaperUpload(commands::wallpaper::UploadArgs),

    /// Push the wallpaper and set changeability.
    WallpaperSet(commands::wallpaper::SetArgs),

    /// Fetch remaining merchant credit.
    Credit(QueryArgs),

    /// List recently issued commands and their states.
    History(QueryArgs),

    /// List vendor backends.
    #[command(visible_alias = "v")]
    Vendors,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("mdmlink=debug,info")
    } else {
        EnvFilter::new("mdmlink=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Connects the adapter for the given query args.
pub async fn connect_adapter(args: &QueryArgs) -> Result<Box<dyn Mdm>> {
    let query = args.to_query()?;
    let settings = Settings::from_env()?;
    let adapter = mdmlink_vendors::connect(query, &settings, TokenCache::new()).await?;
    Ok(adapter)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Device(args) => commands::device::run_device(args, &cli).await,
        Commands::Detail(args) => commands::device::run_detail(args, &cli).await,
        Commands::EscrowKey(args) => commands::device::run_escrow_key(args, &cli).await,
        Commands::Locations(args) => commands::device::run_locations(args, &cli).await,
        Commands::Lock(args) => commands::control::run_lock(args, &cli).await,
        Commands::Unlock(args) => commands::control::run_unlock(args, &cli).await,
        Commands::RefreshLocation(args) => {
            commands::control::run_refresh_location(args, &cli).await
        }
        Commands::Supervise(args) => commands::control::run_supervise(args, &cli).await,
        Commands::Remove(args) => commands::control::run_remove(args, &cli).await,
        Commands::ClearPasscode(args) => commands::control::run_clear_passcode(args, &cli).await,
        Commands::HideApp(args) => commands::control::run_hide_app(args, &cli).await,
        Commands::Restrict(args) => commands::control::run_restrict(args, &cli).await,
        Commands::ProxyOn(args) => commands::control::run_proxy(args, &cli, true).await,
        Commands::ProxyOff(args) => commands::control::run_proxy(args, &cli, false).await,
        Commands::Wallpapers(args) => commands::wallpaper::run_list(args, &cli).await,
        Commands::WallpaperUpload(args) => commands::wallpaper::run_upload(args, &cli).await,
        Commands::WallpaperSet(args) => commands::wallpaper::run_set(args, &cli).await,
        Commands::Credit(args) => commands::credit::run(args, &cli).await,
        Commands::History(args) => commands::device::run_history(args, &cli).await,
        Commands::Vendors => commands::vendors::run(&cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
