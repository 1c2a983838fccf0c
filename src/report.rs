use chrono::{DateTime, Utc};
use ethers::types::Address;
use serde::{Deserialize, Serialize};

use crate::serde_utils;
use crate::types::BlockNumber;

pub mod contract_deployment;

pub const DEFAULT_RECORD_PATH: &str = "../DEPLOYMENT.json";

/// What gets persisted after a successful deployment so the address survives
/// whatever happens afterwards.
///
/// `block_number` is the chain height when the record was assembled, which
/// can be past the block the deployment was included in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub network: String,
    #[serde(with = "serde_utils::checksum")]
    pub contract_address: Address,
    #[serde(with = "serde_utils::checksum")]
    pub token_address: Address,
    #[serde(with = "serde_utils::checksum")]
    pub owner_address: Address,
    #[serde(with = "serde_utils::iso8601")]
    pub deployed_at: DateTime<Utc>,
    pub block_number: BlockNumber,
}
