use std::fmt;

use tracing::{info, instrument, warn};

use crate::deployment::DeploymentContext;
use crate::report::contract_deployment::ContractDeployment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    Failed { reason: String },
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "verified"),
            Self::Failed { reason } => write!(f, "failed ({reason})"),
        }
    }
}

/// Never fails on behalf of the verifier, only on console errors
#[instrument(skip_all)]
pub async fn verify_source(
    context: &DeploymentContext,
    deployment: &ContractDeployment,
) -> eyre::Result<VerificationOutcome> {
    let request = context.verification_request(deployment.address);
    let console = &context.console;

    console.blank()?;
    console.line("🔍 Verifying contract on the block explorer...")?;

    match context.verifier.verify(&request).await {
        Ok(()) => {
            info!(address = ?deployment.address, "Source verified");
            console.line("✅ Contract verified!")?;

            Ok(VerificationOutcome::Verified)
        }
        Err(err) => {
            warn!("Verification failed: {err:?}");

            let reason = err.to_string();

            console.line(format_args!("❌ Verification failed: {reason}"))?;
            console.line("You can verify manually later with:")?;
            console.line(request.manual_command())?;

            Ok(VerificationOutcome::Failed { reason })
        }
    }
}
