use ethers::utils::{format_ether, to_checksum};
use tracing::instrument;

use crate::deployment::DeploymentContext;

#[instrument(skip_all)]
pub async fn announce(context: &DeploymentContext) -> eyre::Result<()> {
    let console = &context.console;

    console.line(format_args!("🚀 Deploying {}...", context.config.contract))?;
    console.blank()?;

    let balance = context.chain.balance(context.owner).await?;

    console.line(format_args!(
        "Deploying with account: {}",
        to_checksum(&context.owner, None)
    ))?;
    console.line(format_args!("Account balance: {} ETH", format_ether(balance)))?;
    console.blank()?;

    Ok(())
}
