use std::sync::Arc;
use async_trait::async_trait;

use crate::error::DashboardError;
use crate::models::PageCategory;
use crate::registry::WalletGroup;
use crate::traits::event_handler::DashboardEventHandler;
use crate::tracker::page::PageView;
use crate::views::{
    networth::{NetworthTrend, WalletCard},
    nft::NftGallery,
    token_detail::{TokenDetailView, TokenListingRow},
    tokens::TokenTable,
    transactions::TransactionList,
};

/// Composite renderer forwarding every page to each inner renderer in order
pub struct CompositeEventHandler {
    handlers: Vec<Arc<dyn DashboardEventHandler>>,
}

impl CompositeEventHandler {
    /// Create a new composite event handler
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Add a handler to the composite
    pub fn add_handler(&mut self, handler: Arc<dyn DashboardEventHandler>) {
        self.handlers.push(handler);
    }

    /// Check if there are any handlers
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Number of handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for CompositeEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardEventHandler for CompositeEventHandler {
    async fn render_wallet_groups(&self, groups: &[(WalletGroup, Vec<PageView<WalletCard>>)]) {
        for handler in &self.handlers {
            handler.render_wallet_groups(groups).await;
        }
    }

    async fn render_networth(&self, address: &str, view: &PageView<(WalletCard, NetworthTrend)>) {
        for handler in &self.handlers {
            handler.render_networth(address, view).await;
        }
    }

    async fn render_tokens(&self, address: &str, view: &PageView<TokenTable>) {
        for handler in &self.handlers {
            handler.render_tokens(address, view).await;
        }
    }

    async fn render_nfts(&self, address: &str, view: &PageView<NftGallery>) {
        for handler in &self.handlers {
            handler.render_nfts(address, view).await;
        }
    }

    async fn render_transactions(&self, address: &str, view: &PageView<TransactionList>) {
        for handler in &self.handlers {
            handler.render_transactions(address, view).await;
        }
    }

    async fn render_token_detail(&self, contract: &str, view: &PageView<TokenDetailView>) {
        for handler in &self.handlers {
            handler.render_token_detail(contract, view).await;
        }
    }

    async fn render_token_list(&self, view: &PageView<Vec<TokenListingRow>>) {
        for handler in &self.handlers {
            handler.render_token_list(view).await;
        }
    }

    async fn handle_error(&self, category: PageCategory, address: &str, error: &DashboardError) {
        for handler in &self.handlers {
            handler.handle_error(category, address, error).await;
        }
    }
}
