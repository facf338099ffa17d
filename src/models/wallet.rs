use std::fmt;

use serde::{Deserialize, Serialize};

/// Label a watched wallet is grouped under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WalletCategory {
    Personal,
    Business,
    Savings,
    Other(String),
}

impl WalletCategory {
    /// Categories offered when adding a wallet
    pub const PRESETS: [WalletCategory; 3] = [
        WalletCategory::Personal,
        WalletCategory::Business,
        WalletCategory::Savings,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            WalletCategory::Personal => "Personal",
            WalletCategory::Business => "Business",
            WalletCategory::Savings => "Savings",
            WalletCategory::Other(label) => label,
        }
    }
}

impl Default for WalletCategory {
    fn default() -> Self {
        WalletCategory::Personal
    }
}

impl From<String> for WalletCategory {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Personal" => WalletCategory::Personal,
            "Business" => WalletCategory::Business,
            "Savings" => WalletCategory::Savings,
            _ => WalletCategory::Other(label),
        }
    }
}

impl From<&str> for WalletCategory {
    fn from(label: &str) -> Self {
        WalletCategory::from(label.to_string())
    }
}

impl From<WalletCategory> for String {
    fn from(category: WalletCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for WalletCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-tracked address, persisted as `{address, category}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedWallet {
    pub address: String,
    pub category: WalletCategory,
}

impl WatchedWallet {
    pub fn new(address: impl Into<String>, category: impl Into<WalletCategory>) -> Self {
        Self {
            address: address.into().trim().to_string(),
            category: category.into(),
        }
    }

    /// Case-insensitive address comparison
    pub fn matches(&self, address: &str) -> bool {
        same_address(&self.address, address)
    }
}

/// EVM addresses compare without regard to checksum casing
pub fn same_address(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
