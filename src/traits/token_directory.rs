use async_trait::async_trait;

use crate::error::DashboardResult;
use crate::models::TokenDetails;

/// Token metadata lookup by contract address
#[async_trait]
pub trait TokenDirectory: Send + Sync {
    /// Metadata for one contract on a chain; `Ok(None)` when the
    /// collaborator has no record for it
    async fn get_token(&self, contract: &str, chain_id: u64) -> DashboardResult<Option<TokenDetails>>;

    /// All tokens the collaborator knows about
    async fn list_tokens(&self) -> DashboardResult<Vec<TokenDetails>>;
}
