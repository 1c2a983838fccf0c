use indicatif::ProgressStyle;
use tracing::{instrument, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::deployment::DeploymentContext;
use crate::report::contract_deployment::ContractDeployment;

/// Explorers refuse to verify until the creation transaction is buried a bit
#[instrument(skip_all)]
pub async fn await_confirmations(
    context: &DeploymentContext,
    deployment: &ContractDeployment,
) -> eyre::Result<()> {
    let confirmations = context.config.verify_confirmations;

    context.console.blank()?;
    context.console.line(format_args!(
        "⏳ Waiting for {confirmations} block confirmations..."
    ))?;

    let span = Span::current();
    span.pb_set_style(&ProgressStyle::with_template(
        "{spinner:.green} {msg} [{elapsed}]",
    )?);
    span.pb_set_message(&format!(
        "waiting for {confirmations} confirmations of {:?}",
        deployment.transaction_hash
    ));

    context
        .chain
        .wait_for_confirmations(deployment.transaction_hash, confirmations)
        .await
}
