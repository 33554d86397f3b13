//! Credit command.

use anyhow::Result;

use crate::output::print_result;
use crate::{connect_adapter, Cli, QueryArgs};

/// Runs the credit command.
pub async fn run(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let adapter = connect_adapter(args).await?;
    let credit = adapter.get_credit().await?;

    print_result(cli, &credit, || format!("credit: {:.2}", credit.credit))
}
