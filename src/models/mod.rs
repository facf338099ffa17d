//! Data models for wallets and collaborator records

pub mod history;
pub mod networth;
pub mod nft;
pub mod page;
pub mod token;
pub mod transaction;
pub mod validate;
pub mod wallet;

// Re-export for convenience
pub use history::{HistoryPoint, TimeRange};
pub use networth::{ChainNetworth, NetworthSnapshot};
pub use nft::NftHolding;
pub use page::PageCategory;
pub use token::{AmountScaling, TokenDetails, TokenHolding};
pub use transaction::{ReceiptStatus, Transaction};
pub use validate::Validate;
pub use wallet::{same_address, WalletCategory, WatchedWallet};
