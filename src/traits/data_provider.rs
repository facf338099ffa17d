use async_trait::async_trait;

use crate::error::DashboardResult;
use crate::models::{NetworthSnapshot, NftHolding, TokenHolding, Transaction};

/// Core trait for fetching wallet data from the aggregation API.
///
/// Every call is a one-shot request; failures are returned, never retried.
#[async_trait]
pub trait WalletDataProvider: Send + Sync {
    /// Fetch the cross-chain net worth of a wallet
    async fn fetch_networth(&self, address: &str) -> DashboardResult<NetworthSnapshot>;

    /// Fetch one page of token balances
    async fn fetch_tokens(&self, address: &str, page: u32) -> DashboardResult<Vec<TokenHolding>>;

    /// Fetch one page of NFT holdings
    async fn fetch_nfts(&self, address: &str, page: u32) -> DashboardResult<Vec<NftHolding>>;

    /// Fetch one page of transaction history
    async fn fetch_transactions(&self, address: &str, page: u32) -> DashboardResult<Vec<Transaction>>;
}
