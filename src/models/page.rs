use std::fmt;

/// Pages reachable for one address, plus the token pages keyed by contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageCategory {
    Networth,
    Tokens,
    Nfts,
    Transactions,
    TokenDetail,
    TokenList,
}

impl PageCategory {
    /// Navigation entries shown for a wallet, in display order
    pub const WALLET_PAGES: [PageCategory; 4] = [
        PageCategory::Networth,
        PageCategory::Tokens,
        PageCategory::Nfts,
        PageCategory::Transactions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PageCategory::Networth => "Overview",
            PageCategory::Tokens => "Tokens",
            PageCategory::Nfts => "NFTs",
            PageCategory::Transactions => "Transactions",
            PageCategory::TokenDetail => "Token",
            PageCategory::TokenList => "Tokens",
        }
    }

    /// Route path for this page relative to the wallet address
    pub fn route(&self, key: &str) -> String {
        match self {
            PageCategory::Networth => format!("/{}", key),
            PageCategory::Tokens => format!("/{}/tokens", key),
            PageCategory::Nfts => format!("/{}/nfts", key),
            PageCategory::Transactions => format!("/{}/transactions", key),
            PageCategory::TokenDetail => format!("/tokens/{}", key),
            PageCategory::TokenList => "/tokens".to_string(),
        }
    }

    /// Message shown when a successful fetch returns no records
    pub fn empty_message(&self) -> String {
        match self {
            PageCategory::Networth => "No chains with a balance for this address.".to_string(),
            PageCategory::TokenList => "No tokens listed.".to_string(),
            PageCategory::TokenDetail => "Token not found.".to_string(),
            other => format!("No {} found for this address.", other.subject()),
        }
    }

    pub(crate) fn subject(&self) -> &'static str {
        match self {
            PageCategory::Networth => "net worth",
            PageCategory::Tokens | PageCategory::TokenList => "tokens",
            PageCategory::Nfts => "NFTs",
            PageCategory::Transactions => "transactions",
            PageCategory::TokenDetail => "token",
        }
    }

    pub(crate) fn subject_singular(&self) -> &'static str {
        match self {
            PageCategory::Networth => "Wallet",
            PageCategory::Tokens | PageCategory::TokenList | PageCategory::TokenDetail => "Token",
            PageCategory::Nfts => "NFT",
            PageCategory::Transactions => "Transaction",
        }
    }
}

impl fmt::Display for PageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subject())
    }
}
