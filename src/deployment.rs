use std::sync::Arc;

use tracing::{info, warn};

use self::backends::{ForgeDeployer, ForgeSourceVerifier};
use self::steps::verify_source::VerificationOutcome;
use self::steps::{
    announce, await_confirmations, deploy_contract, persist_record, summary,
    verify_source,
};
use crate::chain::RpcChain;
use crate::cli::Args;
use crate::config::Config;
use crate::console::Console;
use crate::report::DeploymentRecord;
use crate::serde_utils;

pub mod backends;
pub mod deployment_context;
pub mod steps;

pub use self::deployment_context::DeploymentContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub record: DeploymentRecord,
    pub verification: VerificationOutcome,
}

pub async fn run_deployment(cmd: Args) -> eyre::Result<()> {
    let mut config: Config = match cmd.config.as_ref() {
        Some(path) => serde_utils::read_deserialize(path).await?,
        None => Config::default(),
    };

    if let Some(network) = cmd.network {
        config.network = network;
    }

    let chain = RpcChain::new(&cmd.rpc_url)?;

    let chain_id = chain.chain_id().await?;
    if chain_id != config.network.chain_id() {
        warn!(
            chain_id,
            expected = config.network.chain_id(),
            network = %config.network,
            "RPC chain id does not match the configured network"
        );
    }

    let owner = cmd.private_key.address();

    let deployer = ForgeDeployer {
        contracts_dir: cmd.contracts_dir.clone(),
        private_key: cmd.private_key,
        rpc_url: cmd.rpc_url,
    };

    let verifier = ForgeSourceVerifier {
        etherscan_api_key: cmd.etherscan_api_key,
    };

    let context = DeploymentContext {
        config,
        owner,
        record_path: cmd.output,
        contracts_dir: cmd.contracts_dir,
        chain: Arc::new(chain),
        deployer: Arc::new(deployer),
        verifier: Arc::new(verifier),
        console: Console::stdout(),
    };

    let outcome = deploy(&context).await?;

    info!(
        address = ?outcome.record.contract_address,
        verification = %outcome.verification,
        "Done"
    );

    Ok(())
}

/// Runs the whole deployment against the collaborators in `context`.
///
/// The record is on disk before verification starts, and a failed
/// verification is reported in the outcome instead of as an error.
pub async fn deploy(
    context: &DeploymentContext,
) -> eyre::Result<DeploymentOutcome> {
    announce::announce(context).await?;

    let deployment = deploy_contract::deploy(context).await?;

    let record = persist_record::persist_record(context, &deployment).await?;

    await_confirmations::await_confirmations(context, &deployment).await?;

    let verification =
        verify_source::verify_source(context, &deployment).await?;

    summary::print_summary(context, &record, &verification)?;

    Ok(DeploymentOutcome {
        record,
        verification,
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use ethers::types::{Address, H256, U256};
    use ethers::utils::to_checksum;
    use mockall::predicate::eq;
    use mockall::Sequence;

    use super::backends::{MockContractDeployer, MockSourceVerifier};
    use super::*;
    use crate::chain::MockChainClient;
    use crate::config::SEPOLIA_USDC;
    use crate::console::testing::SharedBuffer;
    use crate::report::contract_deployment::ContractDeployment;
    use crate::types::{BlockNumber, Confirmations};

    const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    const DEPLOYED: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const REDEPLOYED: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn address(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn checksummed(s: &str) -> String {
        to_checksum(&address(s), None)
    }

    fn deployment(address_str: &str, tx: u64) -> ContractDeployment {
        ContractDeployment {
            address: address(address_str),
            deployer: address(OWNER),
            transaction_hash: H256::from_low_u64_be(tx),
        }
    }

    fn happy_chain(height: u64) -> MockChainClient {
        let mut chain = MockChainClient::new();
        chain
            .expect_balance()
            .returning(|_| Ok(U256::exp10(18)));
        chain
            .expect_wait_for_confirmations()
            .returning(|_, _| Ok(()));
        chain.expect_has_code().returning(|_| Ok(true));
        chain
            .expect_block_number()
            .returning(move || Ok(BlockNumber(height)));
        chain
    }

    fn deployer_returning(address_str: &'static str) -> MockContractDeployer {
        let mut deployer = MockContractDeployer::new();
        deployer
            .expect_deploy()
            .withf(|contract, args| {
                contract.name == "AgentMarketplace"
                    && args.to_vec() == vec![SEPOLIA_USDC]
            })
            .times(1)
            .returning(move |_, _| Ok(deployment(address_str, 1)));
        deployer
    }

    fn verifier_ok() -> MockSourceVerifier {
        let mut verifier = MockSourceVerifier::new();
        verifier.expect_verify().times(1).returning(|_| Ok(()));
        verifier
    }

    fn context(
        record_path: &Path,
        chain: MockChainClient,
        deployer: MockContractDeployer,
        verifier: MockSourceVerifier,
        stdout: SharedBuffer,
    ) -> DeploymentContext {
        DeploymentContext {
            config: Config::default(),
            owner: address(OWNER),
            record_path: record_path.to_owned(),
            contracts_dir: PathBuf::from("contracts"),
            chain: Arc::new(chain),
            deployer: Arc::new(deployer),
            verifier: Arc::new(verifier),
            console: Console::new(stdout),
        }
    }

    fn record_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("DEPLOYMENT.json")
    }

    fn read_record(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn writes_record_and_reports_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = record_path(&dir);
        let stdout = SharedBuffer::default();

        let context = context(
            &path,
            happy_chain(1000),
            deployer_returning(DEPLOYED),
            verifier_ok(),
            stdout.clone(),
        );

        let outcome = deploy(&context).await.unwrap();

        assert_eq!(outcome.verification, VerificationOutcome::Verified);

        let record = read_record(&path);
        let fields = record.as_object().unwrap();
        assert_eq!(fields.len(), 6);
        assert_eq!(record["network"], "sepolia");
        assert_eq!(record["contractAddress"], checksummed(DEPLOYED));
        assert_eq!(
            record["tokenAddress"],
            "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"
        );
        assert_eq!(record["ownerAddress"], OWNER);
        assert_eq!(record["blockNumber"], 1000);
        let deployed_at = record["deployedAt"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(deployed_at).is_ok());
        assert!(deployed_at.ends_with('Z'));

        let stdout = stdout.contents();
        let explorer_line = stdout
            .lines()
            .find(|line| line.starts_with("🔗"))
            .unwrap();
        assert_eq!(
            explorer_line,
            format!(
                "🔗 Explorer: https://sepolia.etherscan.io/address/{}",
                checksummed(DEPLOYED)
            )
        );
        assert!(stdout.contains("✅ Contract verified!"));
        assert!(stdout.trim_end().ends_with("🎉 Deployment complete!"));
    }

    #[tokio::test]
    async fn verification_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = record_path(&dir);
        let stdout = SharedBuffer::default();

        let mut verifier = MockSourceVerifier::new();
        let record_path_for_check = path.clone();
        verifier.expect_verify().times(1).returning(move |_| {
            // The record has to be on disk before the verifier is called
            let record = read_record(&record_path_for_check);
            assert_eq!(record["contractAddress"], checksummed(DEPLOYED));

            Err(eyre::eyre!("Already Verified"))
        });

        let context = context(
            &path,
            happy_chain(1000),
            deployer_returning(DEPLOYED),
            verifier,
            stdout.clone(),
        );

        let outcome = deploy(&context).await.unwrap();

        assert_eq!(
            outcome.verification,
            VerificationOutcome::Failed {
                reason: "Already Verified".to_string()
            }
        );

        let stdout = stdout.contents();
        assert!(stdout.contains("❌ Verification failed: Already Verified"));
        assert!(stdout.contains(&format!(
            "forge verify-contract --watch --root contracts --chain sepolia \
             --constructor-args \
             0x0000000000000000000000001c7d4b196cb0c7b01d743fbc6116a902379c7238 \
             {} AgentMarketplace",
            checksummed(DEPLOYED)
        )));
        assert!(stdout.contains("🎉 Deployment complete!"));
    }

    #[tokio::test]
    async fn failed_deployment_leaves_previous_record_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = record_path(&dir);
        std::fs::write(&path, "previous run").unwrap();

        let mut deployer = MockContractDeployer::new();
        deployer
            .expect_deploy()
            .times(1)
            .returning(|_, _| Err(eyre::eyre!("execution reverted")));

        let mut chain = MockChainClient::new();
        chain.expect_balance().returning(|_| Ok(U256::zero()));
        chain.expect_block_number().never();

        let mut verifier = MockSourceVerifier::new();
        verifier.expect_verify().never();

        let context = context(
            &path,
            chain,
            deployer,
            verifier,
            SharedBuffer::default(),
        );

        let err = deploy(&context).await.unwrap_err();

        assert!(err.to_string().contains("execution reverted"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous run");
    }

    #[tokio::test]
    async fn failed_deployment_creates_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = record_path(&dir);

        let mut chain = MockChainClient::new();
        chain.expect_balance().returning(|_| Ok(U256::zero()));
        chain
            .expect_wait_for_confirmations()
            .returning(|_, _| Ok(()));
        // Receipt without code at the address
        chain.expect_has_code().returning(|_| Ok(false));

        let mut verifier = MockSourceVerifier::new();
        verifier.expect_verify().never();

        let context = context(
            &path,
            chain,
            deployer_returning(DEPLOYED),
            verifier,
            SharedBuffer::default(),
        );

        assert!(deploy(&context).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn unwritable_record_aborts_before_verification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("DEPLOYMENT.json");

        let mut verifier = MockSourceVerifier::new();
        verifier.expect_verify().never();

        let context = context(
            &path,
            happy_chain(7),
            deployer_returning(DEPLOYED),
            verifier,
            SharedBuffer::default(),
        );

        assert!(deploy(&context).await.is_err());
    }

    #[tokio::test]
    async fn waits_one_then_six_confirmations_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let tx = deployment(DEPLOYED, 1).transaction_hash;

        let mut seq = Sequence::new();
        let mut chain = MockChainClient::new();
        chain.expect_balance().returning(|_| Ok(U256::zero()));
        chain
            .expect_wait_for_confirmations()
            .with(eq(tx), eq(Confirmations(1)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        chain
            .expect_has_code()
            .with(eq(address(DEPLOYED)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        chain
            .expect_block_number()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(BlockNumber(42)));
        chain
            .expect_wait_for_confirmations()
            .with(eq(tx), eq(Confirmations(6)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let context = context(
            &record_path(&dir),
            chain,
            deployer_returning(DEPLOYED),
            verifier_ok(),
            SharedBuffer::default(),
        );

        let outcome = deploy(&context).await.unwrap();
        assert_eq!(outcome.record.block_number, BlockNumber(42));
    }

    #[tokio::test]
    async fn second_run_overwrites_first_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = record_path(&dir);

        let mut addresses = Vec::new();
        for (deployed, height) in [(DEPLOYED, 1000), (REDEPLOYED, 1010)] {
            let context = context(
                &path,
                happy_chain(height),
                deployer_returning(deployed),
                verifier_ok(),
                SharedBuffer::default(),
            );

            deploy(&context).await.unwrap();

            let record = read_record(&path);
            assert_eq!(record["blockNumber"], height);
            addresses.push(record["contractAddress"].as_str().unwrap().to_owned());
        }

        assert_ne!(addresses[0], addresses[1]);
        assert_eq!(addresses[1], checksummed(REDEPLOYED));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
