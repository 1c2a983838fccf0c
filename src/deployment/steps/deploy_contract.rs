use ethers::utils::to_checksum;
use eyre::ensure;
use tracing::{info, instrument, warn};

use crate::deployment::DeploymentContext;
use crate::report::contract_deployment::ContractDeployment;

#[instrument(skip_all)]
pub async fn deploy(
    context: &DeploymentContext,
) -> eyre::Result<ContractDeployment> {
    let contract_spec = context.contract_spec();

    let deployment = context
        .deployer
        .deploy(&contract_spec, &context.constructor_args())
        .await?;

    context
        .chain
        .wait_for_confirmations(
            deployment.transaction_hash,
            context.config.deploy_confirmations,
        )
        .await?;

    ensure!(
        context.chain.has_code(deployment.address).await?,
        "No code at {:?} after deploying {contract_spec}",
        deployment.address
    );

    if deployment.deployer != context.owner {
        warn!(
            deployer = ?deployment.deployer,
            owner = ?context.owner,
            "Contract was created by a different account than the configured owner"
        );
    }

    info!(address = ?deployment.address, tx = ?deployment.transaction_hash, "Deployed");

    let address = to_checksum(&deployment.address, None);
    let console = &context.console;

    console.line(format_args!(
        "✅ {} deployed to: {address}",
        context.config.contract
    ))?;
    console.line(format_args!(
        "📝 Token: {}",
        to_checksum(&context.config.token_address, None)
    ))?;
    console.line(format_args!(
        "👤 Owner: {}",
        to_checksum(&context.owner, None)
    ))?;

    if let Some(url) = context.config.network.explorer_address_url(&address) {
        console.blank()?;
        console.line(format_args!("🔗 Explorer: {url}"))?;
    }

    Ok(deployment)
}
