use crate::error::DashboardResult;

/// Persistence port for the watched wallet list.
///
/// The store holds a single serialized entry; the registry owns its format.
pub trait WalletStore: Send + Sync {
    /// The persisted entry, or `None` when nothing was saved yet
    fn load(&self) -> DashboardResult<Option<String>>;

    /// Replace the persisted entry
    fn save(&self, payload: &str) -> DashboardResult<()>;
}
