//! Wallet Dashboard Library
//! 
//! Multi-chain wallet dashboard over a Moralis proxy: watched-wallet registry,
//! per-page fetch lifecycle, and view models for net worth, tokens, NFTs and
//! transactions.

// Public modules - these are the API surface
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod registry;
pub mod tracker;
pub mod traits;
pub mod utils;
pub mod views;

// Re-export commonly used items for easier access
pub use config::{DashboardConfig, HistoryMode};
pub use error::{DashboardError, DashboardResult};
pub use models::{
    AmountScaling, NetworthSnapshot, NftHolding, PageCategory, TimeRange, TokenDetails, TokenHolding,
    Transaction, WalletCategory, WatchedWallet,
};
pub use traits::{
    DashboardEventHandler, HistoryProvider, TokenDirectory, WalletDataProvider, WalletStore,
};
pub use providers::{
    FileWalletStore, HttpHistoryProvider, HttpTokenDirectory, MemoryWalletStore, MoralisProxyProvider,
    SyntheticHistory,
};
pub use handlers::{CompositeEventHandler, ConsoleEventHandler};
pub use registry::{WalletGroup, WalletRegistry};
pub use tracker::{Dashboard, FetchTrigger, PageState, PageView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;
