use std::path::PathBuf;
use std::sync::Arc;

use ethers::types::Address;

use super::backends::{ContractDeployer, SourceVerifier, VerificationRequest};
use crate::chain::ChainClient;
use crate::config::Config;
use crate::console::Console;
use crate::forge_utils::ContractSpec;

pub struct DeploymentContext {
    pub config: Config,
    pub owner: Address,
    pub record_path: PathBuf,
    pub contracts_dir: PathBuf,
    pub chain: Arc<dyn ChainClient>,
    pub deployer: Arc<dyn ContractDeployer>,
    pub verifier: Arc<dyn SourceVerifier>,
    pub console: Console,
}

impl DeploymentContext {
    pub fn contract_spec(&self) -> ContractSpec {
        match self.config.contract_path.as_ref() {
            Some(path) => {
                ContractSpec::path_name(path.clone(), &self.config.contract)
            }
            None => ContractSpec::name(&self.config.contract),
        }
    }

    pub fn constructor_args(&self) -> Vec<Address> {
        vec![self.config.token_address]
    }

    pub fn verification_request(&self, address: Address) -> VerificationRequest {
        VerificationRequest {
            contract: self.contract_spec(),
            address,
            network: self.config.network,
            constructor_args: self.constructor_args(),
            root: self.contracts_dir.clone(),
        }
    }
}
