use std::path::PathBuf;

use ethers::types::{Address, Bytes};
use ethers::utils::to_checksum;
use eyre::{ContextCompat, WrapErr};
use tracing::{info, instrument};

use super::ContractSpec;

pub struct ForgeVerify {
    spec: ContractSpec,
    address: Address,
    root: Option<PathBuf>,
    chain: Option<u64>,
    etherscan_api_key: Option<String>,
    constructor_args: Option<Bytes>,
}

impl ForgeVerify {
    pub fn new(spec: ContractSpec, address: Address) -> Self {
        Self {
            spec,
            address,
            root: None,
            chain: None,
            etherscan_api_key: None,
            constructor_args: None,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_chain(mut self, chain: u64) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn with_etherscan_api_key(
        mut self,
        etherscan_api_key: Option<impl ToString>,
    ) -> Self {
        self.etherscan_api_key =
            etherscan_api_key.map(|key| key.to_string());
        self
    }

    /// ABI encoded constructor arguments
    pub fn with_constructor_args(mut self, constructor_args: Bytes) -> Self {
        self.constructor_args = Some(constructor_args);
        self
    }

    fn command(&self) -> eyre::Result<tokio::process::Command> {
        let mut cmd = tokio::process::Command::new("forge");
        cmd.arg("verify-contract");

        cmd.arg("--watch");

        let root = self.root.as_ref().context("Missing root")?;

        cmd.arg("--root");
        cmd.arg(root);

        let chain = self.chain.as_ref().context("Missing chain")?;

        cmd.arg("--chain");
        cmd.arg(chain.to_string());

        let etherscan_api_key = self
            .etherscan_api_key
            .as_ref()
            .context("Missing etherscan api key")?;

        cmd.arg("--etherscan-api-key");
        cmd.arg(etherscan_api_key);

        if let Some(constructor_args) = &self.constructor_args {
            cmd.arg("--constructor-args");
            cmd.arg(constructor_args.to_string());
        }

        cmd.arg(to_checksum(&self.address, None));
        cmd.arg(self.spec.to_string());

        Ok(cmd)
    }

    #[instrument(name = "forge_verify", skip_all)]
    pub async fn run(&self) -> eyre::Result<()> {
        let mut cmd = self.command()?;

        info!(address = ?self.address, contract = %self.spec, "Verifying contract");

        let output = cmd.output().await.wrap_err("Spawning forge")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("forge verify failed: {}", stderr.trim());
        }

        Ok(())
    }
}
