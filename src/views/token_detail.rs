use crate::models::{HistoryPoint, PageCategory, TimeRange, TokenDetails};
use crate::utils::helper::percentage_change;

/// Price card for a single token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDetailView {
    pub details: TokenDetails,
    pub range: TimeRange,
    pub points: Vec<HistoryPoint>,
    /// `None` renders as `N/A`
    pub current_price: Option<f64>,
    pub price_change: f64,
    pub change_pct: f64,
}

impl TokenDetailView {
    pub fn is_gain(&self) -> bool {
        self.price_change >= 0.0
    }
}

/// Current price against the first sample of the selected range
pub fn token_detail(details: &TokenDetails, range: TimeRange, points: Vec<HistoryPoint>) -> TokenDetailView {
    let current = details.usd_price;
    let previous = points.first().map(|p| p.value).unwrap_or(current);

    TokenDetailView {
        details: details.clone(),
        range,
        current_price: (current > 0.0).then_some(current),
        price_change: current - previous,
        change_pct: percentage_change(previous, current),
        points,
    }
}

/// Row of the known-token listing
#[derive(Debug, Clone, PartialEq)]
pub struct TokenListingRow {
    pub name: String,
    pub symbol: String,
    pub chain: String,
    pub route: String,
}

pub fn token_listing(tokens: &[TokenDetails]) -> Vec<TokenListingRow> {
    tokens
        .iter()
        .map(|t| TokenListingRow {
            name: t.display_name().to_string(),
            symbol: t.symbol.clone(),
            chain: t.chain.clone(),
            route: PageCategory::TokenDetail.route(&t.contract_address),
        })
        .collect()
}
