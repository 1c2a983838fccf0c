use ethers::utils::to_checksum;

use super::verify_source::VerificationOutcome;
use crate::deployment::DeploymentContext;
use crate::report::DeploymentRecord;

pub fn print_summary(
    context: &DeploymentContext,
    record: &DeploymentRecord,
    verification: &VerificationOutcome,
) -> eyre::Result<()> {
    let console = &context.console;
    let address = to_checksum(&record.contract_address, None);

    console.blank()?;
    console.line("📋 Summary")?;
    console.line(format_args!("   Network:      {}", record.network))?;
    console.line(format_args!("   Contract:     {address}"))?;
    console.line(format_args!(
        "   Token:        {}",
        to_checksum(&record.token_address, None)
    ))?;
    console.line(format_args!(
        "   Owner:        {}",
        to_checksum(&record.owner_address, None)
    ))?;
    console.line(format_args!("   Block:        {}", record.block_number))?;

    if let Some(url) = context.config.network.explorer_address_url(&address) {
        console.line(format_args!("   Explorer:     {url}"))?;
    }

    console.line(format_args!("   Verification: {verification}"))?;

    console.blank()?;
    console.line("🎉 Deployment complete!")?;

    Ok(())
}
