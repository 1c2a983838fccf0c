use ethers::types::{Address, H256};

use crate::forge_utils::ForgeOutput;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractDeployment {
    pub address: Address,
    pub deployer: Address,
    pub transaction_hash: H256,
}

impl From<ForgeOutput> for ContractDeployment {
    fn from(value: ForgeOutput) -> Self {
        Self {
            address: value.deployed_to,
            deployer: value.deployer,
            transaction_hash: value.transaction_hash,
        }
    }
}
