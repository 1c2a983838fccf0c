use std::path::PathBuf;

use clap::Parser;

pub mod private_key;

pub use private_key::PrivateKey;
use reqwest::Url;

use crate::config::Network;
use crate::report::DEFAULT_RECORD_PATH;

#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case")]
pub struct Args {
    /// Private key of the deploying account
    #[clap(short, long, env)]
    pub private_key: PrivateKey,

    /// The RPC Url to use for the deployment
    #[clap(short, long, env)]
    pub rpc_url: Url,

    /// The etherscan API key to use
    ///
    /// Verification is attempted regardless and reported as failed without it
    #[clap(short, long, env)]
    pub etherscan_api_key: Option<String>,

    /// Path to an optional deployment configuration file
    #[clap(short, long, env)]
    pub config: Option<PathBuf>,

    /// Overrides the network from the configuration file
    #[clap(short, long, env)]
    pub network: Option<Network>,

    /// Root of the forge project containing the contract sources
    #[clap(long, env, default_value = ".")]
    pub contracts_dir: PathBuf,

    /// Where to write the deployment record
    #[clap(short, long, env, default_value = DEFAULT_RECORD_PATH)]
    pub output: PathBuf,
}
