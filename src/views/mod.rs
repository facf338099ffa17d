//! Pure derivations from fetched records to presentation-ready values

pub mod networth;
pub mod nft;
pub mod token_detail;
pub mod tokens;
pub mod transactions;

pub use networth::{networth_trend, wallet_card, ChainShare, NetworthTrend, WalletCard};
pub use nft::{nft_gallery, NftCard, NftGallery};
pub use token_detail::{token_detail, token_listing, TokenDetailView, TokenListingRow};
pub use tokens::{
    distribution, search, sort_rows, token_table, value_tokens, ChainFilter, DistributionSlice,
    SortKey, SortOrder, TokenQuery, TokenRow, TokenTable,
};
pub use transactions::{classify, transaction_list, Direction, TransactionList, TransactionRow};
