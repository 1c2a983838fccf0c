use std::time::Duration;

use ethers::providers::{Http, Middleware, PendingTransaction, Provider};
use ethers::types::{Address, H256, U256};
use eyre::{bail, ContextCompat, WrapErr};
use reqwest::Url;
use tracing::{info, instrument};

use crate::types::{BlockNumber, Confirmations};

/// Read side of the chain the deployment is observed through
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    async fn balance(&self, account: Address) -> eyre::Result<U256>;

    async fn block_number(&self) -> eyre::Result<BlockNumber>;

    /// Blocks until `transaction_hash` has `confirmations` confirmations and
    /// fails if it reverted.
    async fn wait_for_confirmations(
        &self,
        transaction_hash: H256,
        confirmations: Confirmations,
    ) -> eyre::Result<()>;

    async fn has_code(&self, address: Address) -> eyre::Result<bool>;
}

pub struct RpcChain {
    provider: Provider<Http>,
}

impl RpcChain {
    pub fn new(rpc_url: &Url) -> eyre::Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url.as_str())?
            .interval(Duration::from_secs(2));

        Ok(Self { provider })
    }

    pub async fn chain_id(&self) -> eyre::Result<u64> {
        Ok(self.provider.get_chainid().await?.as_u64())
    }
}

#[async_trait::async_trait]
impl ChainClient for RpcChain {
    async fn balance(&self, account: Address) -> eyre::Result<U256> {
        self.provider
            .get_balance(account, None)
            .await
            .wrap_err_with(|| format!("Fetching balance of {account:?}"))
    }

    async fn block_number(&self) -> eyre::Result<BlockNumber> {
        let block_number = self
            .provider
            .get_block_number()
            .await
            .wrap_err("Fetching block number")?;

        Ok(BlockNumber(block_number.as_u64()))
    }

    #[instrument(skip(self))]
    async fn wait_for_confirmations(
        &self,
        transaction_hash: H256,
        confirmations: Confirmations,
    ) -> eyre::Result<()> {
        let receipt = PendingTransaction::new(transaction_hash, &self.provider)
            .confirmations(*confirmations)
            .await
            .wrap_err("Awaiting receipt")?
            .context("Transaction dropped from mempool")?;

        if receipt.status != Some(1.into()) {
            bail!("Transaction {transaction_hash:?} reverted");
        }

        info!(block = ?receipt.block_number, "Confirmed");

        Ok(())
    }

    async fn has_code(&self, address: Address) -> eyre::Result<bool> {
        let code = self
            .provider
            .get_code(address, None)
            .await
            .wrap_err_with(|| format!("Fetching code at {address:?}"))?;

        Ok(!code.0.is_empty())
    }
}
