//! Core traits for the dashboard

pub mod data_provider;
pub mod event_handler;
pub mod history_provider;
pub mod token_directory;
pub mod wallet_store;

// Re-export for convenience
pub use data_provider::WalletDataProvider;
pub use event_handler::DashboardEventHandler;
pub use history_provider::HistoryProvider;
pub use token_directory::TokenDirectory;
pub use wallet_store::WalletStore;
