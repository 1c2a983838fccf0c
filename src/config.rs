use std::path::PathBuf;

use ethers::types::{Address, H160};
use hex_literal::hex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::Confirmations;

/// Circle's official USDC on Sepolia
pub const SEPOLIA_USDC: Address =
    H160(hex!("1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"));

pub const DEFAULT_CONTRACT: &str = "AgentMarketplace";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Network {
    #[default]
    Sepolia,
    Mainnet,
    BaseSepolia,
    Localhost,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Sepolia => 11_155_111,
            Self::Mainnet => 1,
            Self::BaseSepolia => 84_532,
            Self::Localhost => 31_337,
        }
    }

    pub fn explorer_url(&self) -> Option<Url> {
        let url = match self {
            Self::Sepolia => "https://sepolia.etherscan.io",
            Self::Mainnet => "https://etherscan.io",
            Self::BaseSepolia => "https://sepolia.basescan.org",
            Self::Localhost => return None,
        };

        Url::parse(url).ok()
    }

    pub fn explorer_address_url(&self, address: &str) -> Option<String> {
        let base = self.explorer_url()?;
        let base = base.as_str().trim_end_matches('/');

        Some(format!("{base}/address/{address}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: Network,
    pub contract: String,
    /// Source file of `contract`, relative to the forge project root.
    /// Only needed when the name alone is ambiguous.
    pub contract_path: Option<PathBuf>,
    pub token_address: Address,
    pub deploy_confirmations: Confirmations,
    pub verify_confirmations: Confirmations,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            contract: DEFAULT_CONTRACT.to_string(),
            contract_path: None,
            token_address: SEPOLIA_USDC,
            deploy_confirmations: Confirmations(1),
            verify_confirmations: Confirmations(6),
        }
    }
}
