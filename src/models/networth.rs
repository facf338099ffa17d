use serde::{Deserialize, Serialize};

use super::validate::{lenient_f64, non_negative, Validate};

/// Per-chain slice of a wallet's net worth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainNetworth {
    pub chain: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub native_balance: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub native_balance_usd: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub token_balance_usd: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub networth_usd: f64,
}

/// Aggregated USD valuation of one address across chains.
///
/// Superseded wholesale by the next fetch, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworthSnapshot {
    #[serde(default)]
    pub address: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_networth_usd: f64,
    #[serde(default)]
    pub chain_networths: Vec<ChainNetworth>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl NetworthSnapshot {
    pub fn new(address: impl Into<String>, total_networth_usd: f64, chains: Vec<ChainNetworth>) -> Self {
        Self {
            address: address.into(),
            total_networth_usd,
            chain_networths: chains,
            updated_at: None,
        }
    }

    /// Check if snapshot holds no chain entries
    pub fn is_empty(&self) -> bool {
        self.chain_networths.is_empty()
    }

    pub fn chain_count(&self) -> usize {
        self.chain_networths.len()
    }
}

impl ChainNetworth {
    pub fn new(chain: impl Into<String>, networth_usd: f64) -> Self {
        Self {
            chain: chain.into(),
            native_balance: 0.0,
            native_balance_usd: 0.0,
            token_balance_usd: 0.0,
            networth_usd,
        }
    }
}

impl Validate for NetworthSnapshot {
    fn validate(&self) -> Result<(), String> {
        non_negative("totalNetworthUsd", self.total_networth_usd)?;
        for chain in &self.chain_networths {
            if chain.chain.trim().is_empty() {
                return Err("chainNetworths entry without chain".to_string());
            }
            non_negative(&format!("{}.networthUsd", chain.chain), chain.networth_usd)?;
        }
        Ok(())
    }
}
