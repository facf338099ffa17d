use crate::models::{HistoryPoint, NetworthSnapshot};
use crate::utils::helper::{format_address, percentage_change};

/// One chain's slice of a wallet card
#[derive(Debug, Clone, PartialEq)]
pub struct ChainShare {
    pub chain: String,
    pub value_usd: f64,
    /// Fraction of the wallet total in `[0, 1]`
    pub share: f64,
}

impl ChainShare {
    pub fn percent(&self) -> f64 {
        self.share * 100.0
    }
}

/// Summary card for a watched wallet
#[derive(Debug, Clone, PartialEq)]
pub struct WalletCard {
    pub address: String,
    pub short_address: String,
    pub total_usd: f64,
    pub chains: Vec<ChainShare>,
}

pub fn wallet_card(snapshot: &NetworthSnapshot) -> WalletCard {
    let total = snapshot.total_networth_usd.max(0.0);
    let chains = snapshot
        .chain_networths
        .iter()
        .map(|c| ChainShare {
            chain: c.chain.clone(),
            value_usd: c.networth_usd,
            share: if total > 0.0 { c.networth_usd / total } else { 0.0 },
        })
        .collect();

    WalletCard {
        address: snapshot.address.clone(),
        short_address: format_address(&snapshot.address),
        total_usd: total,
        chains,
    }
}

/// Trend line shown in the wallet header
#[derive(Debug, Clone, PartialEq)]
pub struct NetworthTrend {
    pub points: Vec<HistoryPoint>,
    pub first_usd: f64,
    pub latest_usd: f64,
    pub change_pct: f64,
}

impl NetworthTrend {
    pub fn is_gain(&self) -> bool {
        self.change_pct >= 0.0
    }
}

/// Compare the snapshot total against the first sample of the series
pub fn networth_trend(snapshot: &NetworthSnapshot, points: Vec<HistoryPoint>) -> NetworthTrend {
    let latest_usd = snapshot.total_networth_usd;
    let first_usd = points.first().map(|p| p.value).unwrap_or(0.0);

    NetworthTrend {
        change_pct: percentage_change(first_usd, latest_usd),
        first_usd,
        latest_usd,
        points,
    }
}
