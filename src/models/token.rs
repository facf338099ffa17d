use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate::{lenient_f64, non_empty, non_negative, Validate};

/// How `TokenHolding::value` relates to the on-chain integer balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountScaling {
    /// The collaborator already divided by `10^decimals`
    #[default]
    PreScaled,
    /// `value` is the raw integer balance and must be divided by `10^decimals`
    Raw,
}

impl FromStr for AmountScaling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prescaled" | "pre-scaled" | "scaled" => Ok(AmountScaling::PreScaled),
            "raw" => Ok(AmountScaling::Raw),
            other => Err(format!("unknown amount scaling {:?}", other)),
        }
    }
}

/// Token metadata as served by both collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    #[serde(default)]
    pub contract_address: String,
    pub chain: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub possible_spam: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd_price: f64,
}

/// One token balance of an address on a specific chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    #[serde(default)]
    pub address: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub value: f64,
    pub token_details: TokenDetails,
}

impl TokenDetails {
    pub fn new(chain: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>, usd_price: f64) -> Self {
        Self {
            contract_address: String::new(),
            chain: chain.into(),
            name: name.into(),
            symbol: symbol.into(),
            decimals: 18,
            logo: None,
            thumbnail: None,
            possible_spam: false,
            usd_price,
        }
    }

    /// Display name, falling back to the symbol when the name is blank
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.symbol
        } else {
            &self.name
        }
    }
}

impl TokenHolding {
    /// Create a new token holding
    pub fn new(value: f64, token_details: TokenDetails) -> Self {
        Self {
            address: String::new(),
            value,
            token_details,
        }
    }

    /// Human-scaled quantity under the given convention
    pub fn quantity(&self, scaling: AmountScaling) -> f64 {
        match scaling {
            AmountScaling::PreScaled => self.value,
            AmountScaling::Raw => self.value / 10f64.powi(self.token_details.decimals as i32),
        }
    }

    /// Format token amount with symbol
    pub fn formatted_amount(&self, scaling: AmountScaling) -> String {
        format!("{:.4} {}", self.quantity(scaling), self.token_details.symbol)
    }
}

impl Validate for TokenDetails {
    fn validate(&self) -> Result<(), String> {
        non_empty("chain", &self.chain)?;
        non_negative("usdPrice", self.usd_price)
    }
}

impl Validate for TokenHolding {
    fn validate(&self) -> Result<(), String> {
        non_negative("value", self.value)?;
        self.token_details.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_proxy_token_record() {
        let json = r#"{
            "id": 3, "address": "0xabc", "value": 2, "tokenId": 9, "updatedAt": "2024-01-01",
            "tokenDetails": {
                "id": 9, "contractAddress": "0xc02a", "chain": "eth", "name": "Ether",
                "symbol": "ETH", "decimals": 18, "logo": null, "thumbnail": "t.png",
                "possibleSpam": false, "createdAt": "", "updatedAt": "", "usdPrice": 3000
            }
        }"#;
        let holding: TokenHolding = serde_json::from_str(json).unwrap();
        assert_eq!(holding.value, 2.0);
        assert_eq!(holding.token_details.symbol, "ETH");
        assert_eq!(holding.token_details.usd_price, 3000.0);
        assert!(holding.validate().is_ok());
    }

    #[test]
    fn raw_scaling_divides_by_decimals() {
        let mut details = TokenDetails::new("eth", "USD Coin", "USDC", 1.0);
        details.decimals = 6;
        let holding = TokenHolding::new(2_500_000.0, details);
        assert_eq!(holding.quantity(AmountScaling::PreScaled), 2_500_000.0);
        assert!((holding.quantity(AmountScaling::Raw) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn scaling_parses_from_config_strings() {
        assert_eq!("raw".parse::<AmountScaling>(), Ok(AmountScaling::Raw));
        assert_eq!("PreScaled".parse::<AmountScaling>(), Ok(AmountScaling::PreScaled));
        assert!("decimal".parse::<AmountScaling>().is_err());
    }
}
