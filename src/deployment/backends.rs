use std::path::PathBuf;

use ethers::abi::{self, Token};
use ethers::types::{Address, Bytes};
use ethers::utils::to_checksum;
use reqwest::Url;

use crate::cli::PrivateKey;
use crate::config::Network;
use crate::forge_utils::{ContractSpec, ForgeCreate, ForgeVerify};
use crate::report::contract_deployment::ContractDeployment;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Submits the creation transaction and returns once it has a receipt
    async fn deploy(
        &self,
        contract: &ContractSpec,
        constructor_args: &[Address],
    ) -> eyre::Result<ContractDeployment>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SourceVerifier: Send + Sync {
    async fn verify(&self, request: &VerificationRequest) -> eyre::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub contract: ContractSpec,
    pub address: Address,
    pub network: Network,
    pub constructor_args: Vec<Address>,
    /// Forge project root the sources are compiled from
    pub root: PathBuf,
}

impl VerificationRequest {
    pub fn encoded_constructor_args(&self) -> Bytes {
        let tokens: Vec<Token> = self
            .constructor_args
            .iter()
            .copied()
            .map(Token::Address)
            .collect();

        abi::encode(&tokens).into()
    }

    /// Command that retries the verification by hand
    pub fn manual_command(&self) -> String {
        let root = self.root.display().to_string();
        let root = if root.contains(char::is_whitespace) {
            format!("'{root}'")
        } else {
            root
        };

        format!(
            "forge verify-contract --watch --root {root} --chain {} --constructor-args {} {} {}",
            self.network,
            self.encoded_constructor_args(),
            to_checksum(&self.address, None),
            self.contract,
        )
    }
}

pub struct ForgeDeployer {
    pub contracts_dir: PathBuf,
    pub private_key: PrivateKey,
    pub rpc_url: Url,
}

#[async_trait::async_trait]
impl ContractDeployer for ForgeDeployer {
    async fn deploy(
        &self,
        contract: &ContractSpec,
        constructor_args: &[Address],
    ) -> eyre::Result<ContractDeployment> {
        let mut forge_create = ForgeCreate::new(contract.clone())
            .with_cwd(&self.contracts_dir)
            .with_private_key(self.private_key.clone())
            .with_rpc_url(&self.rpc_url);

        for arg in constructor_args {
            forge_create =
                forge_create.with_constructor_arg(to_checksum(arg, None));
        }

        let output = forge_create.run().await?;

        Ok(output.into())
    }
}

pub struct ForgeSourceVerifier {
    pub etherscan_api_key: Option<String>,
}

#[async_trait::async_trait]
impl SourceVerifier for ForgeSourceVerifier {
    async fn verify(&self, request: &VerificationRequest) -> eyre::Result<()> {
        ForgeVerify::new(request.contract.clone(), request.address)
            .with_root(&request.root)
            .with_chain(request.network.chain_id())
            .with_etherscan_api_key(self.etherscan_api_key.as_ref())
            .with_constructor_args(request.encoded_constructor_args())
            .run()
            .await
    }
}
