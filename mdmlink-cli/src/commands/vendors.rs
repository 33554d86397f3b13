//! Vendor listing command.

use anyhow::Result;

use mdmlink_vendors::VendorRegistry;

use crate::output::print_json;
use crate::{Cli, OutputFormat};

/// Runs the vendors command.
pub fn run(cli: &Cli) -> Result<()> {
    let descriptors = VendorRegistry::all();

    if cli.format == OutputFormat::Json {
        let listed: Vec<_> = descriptors
            .iter()
            .map(|d| {
                serde_json::json!({
                    "brand": d.brand.as_str(),
                    "name": d.display_name,
                })
            })
            .collect();
        return print_json(&listed, cli.pretty);
    }

    for descriptor in descriptors {
        println!("{:<20} {}", descriptor.brand.as_str(), descriptor.display_name);
    }
    Ok(())
}
