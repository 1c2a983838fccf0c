use chrono::Utc;
use tracing::{info, instrument};

use crate::deployment::DeploymentContext;
use crate::report::contract_deployment::ContractDeployment;
use crate::report::DeploymentRecord;
use crate::serde_utils;

#[instrument(skip_all)]
pub async fn persist_record(
    context: &DeploymentContext,
    deployment: &ContractDeployment,
) -> eyre::Result<DeploymentRecord> {
    let deployed_at = Utc::now();
    let block_number = context.chain.block_number().await?;

    let record = DeploymentRecord {
        network: context.config.network.to_string(),
        contract_address: deployment.address,
        token_address: context.config.token_address,
        owner_address: context.owner,
        deployed_at,
        block_number,
    };

    serde_utils::write_json_pretty(&context.record_path, &record).await?;

    info!(path = %context.record_path.display(), "Deployment record written");

    context.console.blank()?;
    context.console.line(format_args!(
        "💾 Deployment info saved to {}",
        context.record_path.display()
    ))?;

    Ok(record)
}
