use async_trait::async_trait;

use crate::error::DashboardError;
use crate::models::PageCategory;
use crate::registry::WalletGroup;
use crate::tracker::page::PageView;
use crate::views::{
    networth::{NetworthTrend, WalletCard},
    nft::NftGallery,
    token_detail::{TokenDetailView, TokenListingRow},
    tokens::TokenTable,
    transactions::TransactionList,
};

/// Presentation sink for derived view models
#[async_trait]
pub trait DashboardEventHandler: Send + Sync {
    /// Watched wallets grouped by category, each with its card state
    async fn render_wallet_groups(&self, groups: &[(WalletGroup, Vec<PageView<WalletCard>>)]);

    /// Header card of a wallet page
    async fn render_networth(&self, address: &str, view: &PageView<(WalletCard, NetworthTrend)>);

    async fn render_tokens(&self, address: &str, view: &PageView<TokenTable>);

    async fn render_nfts(&self, address: &str, view: &PageView<NftGallery>);

    async fn render_transactions(&self, address: &str, view: &PageView<TransactionList>);

    async fn render_token_detail(&self, contract: &str, view: &PageView<TokenDetailView>);

    async fn render_token_list(&self, view: &PageView<Vec<TokenListingRow>>);

    /// Called once per failed fetch, before the failure state is rendered
    async fn handle_error(&self, category: PageCategory, address: &str, error: &DashboardError);
}
