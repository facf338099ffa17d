//! Collaborator clients and persistence backends

pub mod history;
pub mod http_provider;
pub mod token_directory;
pub mod wallet_store;

// Re-export for convenience
pub use history::{HttpHistoryProvider, SyntheticHistory};
pub use http_provider::MoralisProxyProvider;
pub use token_directory::HttpTokenDirectory;
pub use wallet_store::{FileWalletStore, MemoryWalletStore};
