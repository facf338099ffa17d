//! Token valuation, distribution and the table's search / sort / chain filter

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::{AmountScaling, TokenHolding};

/// A holding with its derived USD value.
///
/// `position` is the index in the fetched page and breaks sort ties.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow {
    pub position: usize,
    pub name: String,
    pub symbol: String,
    pub chain: String,
    pub contract_address: String,
    pub quantity: f64,
    pub price_usd: f64,
    pub value_usd: f64,
    pub possible_spam: bool,
    pub thumbnail: Option<String>,
}

/// Pie chart slice
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSlice {
    pub label: String,
    pub value_usd: f64,
    pub share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    #[default]
    Value,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }
}

/// Exact chain match, or `All` which disables filtering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainFilter {
    #[default]
    All,
    Chain(String),
}

impl ChainFilter {
    pub fn accepts(&self, chain: &str) -> bool {
        match self {
            ChainFilter::All => true,
            ChainFilter::Chain(wanted) => wanted == chain,
        }
    }
}

impl From<&str> for ChainFilter {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" | "all" => ChainFilter::All,
            chain => ChainFilter::Chain(chain.to_string()),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "value" => Ok(SortKey::Value),
            "price" => Ok(SortKey::Price),
            other => Err(format!("unknown sort key {:?}", other)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order {:?}", other)),
        }
    }
}

/// Display configuration of the token table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenQuery {
    pub search: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub chain: ChainFilter,
}

impl TokenQuery {
    /// Header click: the active key flips its order, a new key starts descending
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.toggle();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::default();
        }
    }
}

/// Derived token page: visible rows, chart over every holding, chain choices
#[derive(Debug, Clone, PartialEq)]
pub struct TokenTable {
    pub rows: Vec<TokenRow>,
    pub distribution: Vec<DistributionSlice>,
    pub chains: Vec<String>,
    pub total_usd: f64,
    pub holding_count: usize,
    pub query: TokenQuery,
}

impl TokenTable {
    pub fn is_empty(&self) -> bool {
        self.holding_count == 0
    }
}

/// `quantity × price` per holding; a zero, missing or invalid price values at 0
pub fn value_tokens(holdings: &[TokenHolding], scaling: AmountScaling) -> Vec<TokenRow> {
    holdings
        .iter()
        .enumerate()
        .map(|(position, holding)| {
            let details = &holding.token_details;
            let quantity = sanitize(holding.quantity(scaling));
            let price_usd = sanitize(details.usd_price);

            TokenRow {
                position,
                name: details.display_name().to_string(),
                symbol: details.symbol.clone(),
                chain: details.chain.clone(),
                contract_address: details.contract_address.clone(),
                quantity,
                price_usd,
                value_usd: sanitize(quantity * price_usd),
                possible_spam: details.possible_spam,
                thumbnail: details.thumbnail.clone().or_else(|| details.logo.clone()),
            }
        })
        .collect()
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

pub fn total_value(rows: &[TokenRow]) -> f64 {
    rows.iter().map(|r| r.value_usd).sum()
}

/// Share of the total per row; every share is 0 when the total is 0
pub fn distribution(rows: &[TokenRow]) -> Vec<DistributionSlice> {
    let total = total_value(rows);
    rows.iter()
        .map(|r| DistributionSlice {
            label: r.symbol.clone(),
            value_usd: r.value_usd,
            share: if total > 0.0 { r.value_usd / total } else { 0.0 },
        })
        .collect()
}

/// Case-insensitive substring match on name or symbol; blank matches all
pub fn search(rows: &[TokenRow], query: &str) -> Vec<TokenRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| r.name.to_lowercase().contains(&needle) || r.symbol.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn filter_chain(rows: &[TokenRow], filter: &ChainFilter) -> Vec<TokenRow> {
    rows.iter().filter(|r| filter.accepts(&r.chain)).cloned().collect()
}

/// Stable sort; ties fall back to fetch order regardless of direction
pub fn sort_rows(rows: &mut [TokenRow], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        let primary = match key {
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortKey::Value => a.value_usd.total_cmp(&b.value_usd),
            SortKey::Price => a.price_usd.total_cmp(&b.price_usd),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        match primary {
            Ordering::Equal => a.position.cmp(&b.position),
            other => other,
        }
    });
}

/// Distinct chains in first-seen order
pub fn unique_chains(rows: &[TokenRow]) -> Vec<String> {
    let mut chains: Vec<String> = Vec::new();
    for row in rows {
        if !chains.contains(&row.chain) {
            chains.push(row.chain.clone());
        }
    }
    chains
}

/// Full token page derivation
pub fn token_table(holdings: &[TokenHolding], scaling: AmountScaling, query: &TokenQuery) -> TokenTable {
    let all = value_tokens(holdings, scaling);

    let mut rows = filter_chain(&search(&all, &query.search), &query.chain);
    sort_rows(&mut rows, query.sort_key, query.sort_order);

    TokenTable {
        distribution: distribution(&all),
        chains: unique_chains(&all),
        total_usd: total_value(&all),
        holding_count: all.len(),
        query: query.clone(),
        rows,
    }
}
