//! Output formatting helpers.

use anyhow::Result;
use serde::Serialize;

use crate::{Cli, OutputFormat};

/// Prints a value as JSON, honoring `--pretty`.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Prints a serializable value in the selected format, using `text` for
/// the human-readable form.
pub fn print_result<T: Serialize>(cli: &Cli, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(value, cli.pretty),
        OutputFormat::Text => {
            println!("{}", text());
            Ok(())
        }
    }
}

/// Renders a boolean command outcome.
pub fn print_ack(cli: &Cli, op: &str, acked: bool) -> Result<()> {
    match cli.format {
        OutputFormat::Json => print_json(
            &serde_json::json!({ "operation": op, "ok": acked }),
            cli.pretty,
        ),
        OutputFormat::Text => {
            println!("{op}: {}", if acked { "ok" } else { "failed" });
            Ok(())
        }
    }
}
