use serde::{Deserialize, Serialize};

use super::validate::{non_empty, Validate};

/// Opaque collectible held by an address; no valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftHolding {
    pub chain: String,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub token_address: String,
    #[serde(default)]
    pub token_id: String,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub possible_spam: bool,
}

impl NftHolding {
    /// Composite key `tokenAddress:tokenId`
    pub fn key(&self) -> String {
        format!("{}:{}", self.token_address.to_lowercase(), self.token_id)
    }
}

impl Validate for NftHolding {
    fn validate(&self) -> Result<(), String> {
        non_empty("chain", &self.chain)
    }
}
