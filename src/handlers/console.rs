use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::DashboardError;
use crate::models::{HistoryPoint, PageCategory};
use crate::registry::WalletGroup;
use crate::traits::event_handler::DashboardEventHandler;
use crate::tracker::page::PageView;
use crate::utils::helper::{format_address, format_percentage, format_usd, truncate_string};
use crate::views::{
    networth::{NetworthTrend, WalletCard},
    nft::NftGallery,
    token_detail::{TokenDetailView, TokenListingRow},
    tokens::TokenTable,
    transactions::TransactionList,
};

const BAR_WIDTH: usize = 20;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Console renderer writing every page to the log
pub struct ConsoleEventHandler {
    /// Row cap per table; spam and long pages are cut here
    max_rows: usize,
}

impl ConsoleEventHandler {
    /// Create a new console renderer
    pub fn new() -> Self {
        Self { max_rows: 25 }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows.max(1);
        self
    }

    fn header(&self, title: &str, subject: &str) {
        info!("{}", "=".repeat(80));
        info!("{} {}", title, subject);
        info!("{}", "-".repeat(80));
    }

    /// Shared non-ready states; returns true when nothing else should be drawn
    fn placeholder<V>(&self, category: PageCategory, view: &PageView<V>) -> bool {
        match view {
            PageView::Loading => {
                info!("  {} {}", "░".repeat(BAR_WIDTH), "loading...");
                info!("  {}", "░".repeat(BAR_WIDTH * 2));
            }
            PageView::Failed(message) => warn!("  {} [retry]", message),
            PageView::Empty(message) => info!("  {}", message),
            PageView::NotFound(message) => info!("  {} ({})", message, category.label()),
            PageView::Ready(_) => return false,
        }
        true
    }

    fn card(&self, card: &WalletCard) {
        info!("  {}  {}", card.short_address, format_usd(card.total_usd));
        for chain in &card.chains {
            info!(
                "     {:<10} {} {:>6.2}%  {}",
                chain.chain,
                progress_bar(chain.share, BAR_WIDTH),
                chain.percent(),
                format_usd(chain.value_usd)
            );
        }
    }
}

impl Default for ConsoleEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardEventHandler for ConsoleEventHandler {
    async fn render_wallet_groups(&self, groups: &[(WalletGroup, Vec<PageView<WalletCard>>)]) {
        self.header("WATCHED WALLETS", "");
        if groups.is_empty() {
            info!("  No wallets added yet.");
            return;
        }

        for (group, cards) in groups {
            info!("{} ({})", group.category, group.wallets.len());
            for (wallet, view) in group.wallets.iter().zip(cards) {
                match view {
                    PageView::Ready(card) => self.card(card),
                    other => {
                        info!("  {}", format_address(&wallet.address));
                        self.placeholder(PageCategory::Networth, other);
                    }
                }
            }
        }
    }

    async fn render_networth(&self, address: &str, view: &PageView<(WalletCard, NetworthTrend)>) {
        self.header("OVERVIEW", address);
        if self.placeholder(PageCategory::Networth, view) {
            return;
        }
        let Some((card, trend)) = view.ready() else { return };

        self.card(card);
        let arrow = if trend.is_gain() { "↑" } else { "↓" };
        info!(
            "  {} {} over {} days",
            arrow,
            format_percentage(trend.change_pct),
            trend.points.len()
        );
        info!("  {}", sparkline(&trend.points));
    }

    async fn render_tokens(&self, address: &str, view: &PageView<TokenTable>) {
        self.header("TOKENS", address);
        if self.placeholder(PageCategory::Tokens, view) {
            return;
        }
        let Some(table) = view.ready() else { return };

        info!(
            "  {} holdings, {} total, sorted by {:?} ({})",
            table.holding_count,
            format_usd(table.total_usd),
            table.query.sort_key,
            table.query.sort_order.label()
        );
        for slice in &table.distribution {
            info!(
                "     {:<12} {} {:>6.2}%",
                truncate_string(&slice.label, 12),
                progress_bar(slice.share, BAR_WIDTH),
                slice.share * 100.0
            );
        }
        if table.rows.is_empty() {
            info!("  No tokens match the current filters.");
        }
        for row in table.rows.iter().take(self.max_rows) {
            let spam = if row.possible_spam { " [spam]" } else { "" };
            info!(
                "  {:<24} {:>8} {:>18.6} {:>14} {:>14}{}",
                truncate_string(&row.name, 24),
                row.symbol,
                row.quantity,
                format_usd(row.price_usd),
                format_usd(row.value_usd),
                spam
            );
        }
        if !table.chains.is_empty() {
            info!("  Chains: {}", table.chains.join(", "));
        }
    }

    async fn render_nfts(&self, address: &str, view: &PageView<NftGallery>) {
        self.header("NFTS", address);
        if self.placeholder(PageCategory::Nfts, view) {
            return;
        }
        let Some(gallery) = view.ready() else { return };

        for card in gallery.cards.iter().take(self.max_rows) {
            info!("  {:<32} {:<8} {:<8} {}", truncate_string(&card.name, 32), card.symbol, card.chain, card.image);
        }
        if gallery.hidden_spam > 0 {
            info!("  {} spam items hidden", gallery.hidden_spam);
        }
    }

    async fn render_transactions(&self, address: &str, view: &PageView<TransactionList>) {
        self.header("TRANSACTIONS", address);
        if self.placeholder(PageCategory::Transactions, view) {
            return;
        }
        let Some(list) = view.ready() else { return };

        info!("  {} in / {} out", list.incoming, list.outgoing);
        for row in list.rows.iter().take(self.max_rows) {
            let counterparty = row
                .counterparty
                .as_deref()
                .map(format_address)
                .unwrap_or_else(|| "contract creation".to_string());
            info!(
                "  {:<3} {} {} {:<7} {:<16} {}",
                row.direction.label(),
                row.amount,
                row.symbol,
                row.status.label(),
                counterparty,
                row.timestamp.as_deref().unwrap_or("-")
            );
            info!("      {}", row.explorer_url);
        }
    }

    async fn render_token_detail(&self, contract: &str, view: &PageView<TokenDetailView>) {
        self.header("TOKEN", contract);
        if self.placeholder(PageCategory::TokenDetail, view) {
            return;
        }
        let Some(detail) = view.ready() else { return };

        let price = detail
            .current_price
            .map(format_usd)
            .unwrap_or_else(|| "N/A".to_string());
        info!("  {} ({}) on {}", detail.details.display_name(), detail.details.symbol, detail.details.chain);
        info!(
            "  {}  {} {} [{}]",
            price,
            if detail.is_gain() { "↑" } else { "↓" },
            format_percentage(detail.change_pct),
            detail.range
        );
        info!("  {}", sparkline(&detail.points));
    }

    async fn render_token_list(&self, view: &PageView<Vec<TokenListingRow>>) {
        self.header("TOKENS", "");
        if self.placeholder(PageCategory::TokenList, view) {
            return;
        }
        let Some(rows) = view.ready() else { return };

        for row in rows.iter().take(self.max_rows) {
            info!("  {:<24} {:<8} {:<10} {}", truncate_string(&row.name, 24), row.symbol, row.chain, row.route);
        }
    }

    async fn handle_error(&self, category: PageCategory, address: &str, error: &DashboardError) {
        warn!("{} page of {}: {}", category.label(), format_address(address), error);
    }
}

/// `████░░░░` style bar for a fraction in `[0, 1]`
fn progress_bar(share: f64, width: usize) -> String {
    let share = if share.is_finite() { share.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (share * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One block character per sample, scaled between the series min and max
fn sparkline(points: &[HistoryPoint]) -> String {
    if points.is_empty() {
        return "(no history)".to_string();
    }

    let (min, max) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        (lo.min(p.value), hi.max(p.value))
    });
    let span = max - min;
    let top = SPARK_LEVELS.len() - 1;

    points
        .iter()
        .map(|p| {
            let level = if span > 0.0 {
                (((p.value - min) / span) * top as f64).round() as usize
            } else {
                top / 2
            };
            SPARK_LEVELS[level.min(top)]
        })
        .collect()
}
