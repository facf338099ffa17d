//! Locally persisted list of watched wallets

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{WalletCategory, WatchedWallet};
use crate::traits::wallet_store::WalletStore;

/// Wallets sharing a category, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletGroup {
    pub category: WalletCategory,
    pub wallets: Vec<WatchedWallet>,
}

/// Watched wallets keyed by address.
///
/// The full list is written through the store on every mutation.
pub struct WalletRegistry {
    wallets: Vec<WatchedWallet>,
    store: Arc<dyn WalletStore>,
}

impl WalletRegistry {
    /// Load the registry from its store; unreadable state starts empty
    pub fn load(store: Arc<dyn WalletStore>) -> Self {
        let wallets = match store.load() {
            Ok(Some(payload)) => match decode_wallets(&payload) {
                Ok(wallets) => wallets,
                Err(e) => {
                    warn!("Discarding persisted wallets: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Wallet store unavailable, starting empty: {}", e);
                Vec::new()
            }
        };

        info!("Loaded {} watched wallets", wallets.len());
        Self { wallets, store }
    }

    /// Insert a wallet unless its address is already watched.
    ///
    /// Returns whether the registry changed.
    pub fn add(&mut self, address: &str, category: impl Into<WalletCategory>) -> DashboardResult<bool> {
        let wallet = WatchedWallet::new(address, category);
        if wallet.address.is_empty() || self.contains(&wallet.address) {
            debug!("Ignoring add for {:?}", address);
            return Ok(false);
        }

        info!("Watching {} ({})", wallet.address, wallet.category);
        self.wallets.push(wallet);
        self.persist()?;
        Ok(true)
    }

    /// Stop watching an address, returning the removed entry
    pub fn remove(&mut self, address: &str) -> DashboardResult<Option<WatchedWallet>> {
        let Some(index) = self.wallets.iter().position(|w| w.matches(address)) else {
            return Ok(None);
        };

        let removed = self.wallets.remove(index);
        info!("Stopped watching {}", removed.address);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Wallets grouped by category, groups in first-seen order
    pub fn list(&self) -> Vec<WalletGroup> {
        let mut groups: Vec<WalletGroup> = Vec::new();
        for wallet in &self.wallets {
            match groups.iter_mut().find(|g| g.category == wallet.category) {
                Some(group) => group.wallets.push(wallet.clone()),
                None => groups.push(WalletGroup {
                    category: wallet.category.clone(),
                    wallets: vec![wallet.clone()],
                }),
            }
        }
        groups
    }

    pub fn wallets(&self) -> &[WatchedWallet] {
        &self.wallets
    }

    pub fn contains(&self, address: &str) -> bool {
        self.wallets.iter().any(|w| w.matches(address))
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    fn persist(&self) -> DashboardResult<()> {
        let payload = serde_json::to_string(&self.wallets)
            .map_err(|e| DashboardError::Persistence(e.to_string()))?;
        self.store.save(&payload)
    }
}

/// Parse the persisted `[{address, category}]` entry, dropping duplicate addresses
pub fn decode_wallets(payload: &str) -> DashboardResult<Vec<WatchedWallet>> {
    let parsed: Vec<WatchedWallet> =
        serde_json::from_str(payload).map_err(|e| DashboardError::MalformedState(e.to_string()))?;

    let mut wallets: Vec<WatchedWallet> = Vec::with_capacity(parsed.len());
    for wallet in parsed {
        let wallet = WatchedWallet::new(wallet.address, wallet.category);
        if !wallet.address.is_empty() && !wallets.iter().any(|w| w.matches(&wallet.address)) {
            wallets.push(wallet);
        }
    }
    Ok(wallets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::wallet_store::MemoryWalletStore;

    fn empty_registry() -> (WalletRegistry, Arc<MemoryWalletStore>) {
        let store = Arc::new(MemoryWalletStore::new());
        (WalletRegistry::load(store.clone()), store)
    }

    #[test]
    fn add_then_remove_restores_previous_state() {
        let (mut registry, _store) = empty_registry();
        registry.add("0x1", WalletCategory::Personal).unwrap();
        let before = registry.wallets().to_vec();

        assert!(registry.add("0x2", WalletCategory::Savings).unwrap());
        assert!(registry.remove("0x2").unwrap().is_some());

        assert_eq!(registry.wallets(), before.as_slice());
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let (mut registry, _store) = empty_registry();
        assert!(registry.add("0xAbC", WalletCategory::Personal).unwrap());
        let once = registry.wallets().to_vec();

        assert!(!registry.add("0xabc", WalletCategory::Business).unwrap());
        assert_eq!(registry.wallets(), once.as_slice());
    }

    #[test]
    fn blank_address_is_ignored() {
        let (mut registry, store) = empty_registry();
        assert!(!registry.add("   ", WalletCategory::Personal).unwrap());
        assert!(registry.is_empty());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn list_groups_by_first_seen_category() {
        let (mut registry, _store) = empty_registry();
        registry.add("0x1", WalletCategory::Business).unwrap();
        registry.add("0x2", WalletCategory::Personal).unwrap();
        registry.add("0x3", WalletCategory::Business).unwrap();
        registry.add("0x4", "Cold").unwrap();

        let groups = registry.list();
        let shape: Vec<(String, Vec<String>)> = groups
            .iter()
            .map(|g| {
                (
                    g.category.to_string(),
                    g.wallets.iter().map(|w| w.address.clone()).collect(),
                )
            })
            .collect();

        assert_eq!(
            shape,
            vec![
                ("Business".to_string(), vec!["0x1".to_string(), "0x3".to_string()]),
                ("Personal".to_string(), vec!["0x2".to_string()]),
                ("Cold".to_string(), vec!["0x4".to_string()]),
            ]
        );
    }

    #[test]
    fn every_mutation_is_persisted_and_reloaded() {
        let (mut registry, store) = empty_registry();
        registry.add("0x1", WalletCategory::Personal).unwrap();
        registry.add("0x2", WalletCategory::Savings).unwrap();
        registry.remove("0x1").unwrap();

        let reloaded = WalletRegistry::load(store);
        assert_eq!(reloaded.wallets(), &[WatchedWallet::new("0x2", WalletCategory::Savings)]);
    }

    #[test]
    fn corrupted_state_yields_empty_registry() {
        let store = Arc::new(MemoryWalletStore::with_payload("{not json"));
        let registry = WalletRegistry::load(store);
        assert!(registry.is_empty());
    }

    #[test]
    fn decode_drops_duplicates() {
        let wallets = decode_wallets(
            r#"[{"address":"0xA","category":"Personal"},{"address":"0xa","category":"Savings"}]"#,
        )
        .unwrap();
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].category, WalletCategory::Personal);
    }
}
