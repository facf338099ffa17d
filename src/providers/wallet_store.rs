use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::traits::wallet_store::WalletStore;

/// Keeps the wallet entry in a single JSON file
pub struct FileWalletStore {
    path: PathBuf,
}

impl FileWalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WalletStore for FileWalletStore {
    fn load(&self) -> DashboardResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DashboardError::Persistence(format!(
                "read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, payload: &str) -> DashboardResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| DashboardError::Persistence(format!("create {}: {}", parent.display(), e)))?;
        }

        // Atomic replace
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| DashboardError::Persistence(format!("write {}: {}", self.path.display(), e)))?;

        debug!("Saved wallet list to {}", self.path.display());
        Ok(())
    }
}

/// In-process store, used by tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryWalletStore {
    entry: RwLock<Option<String>>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            entry: RwLock::new(Some(payload.into())),
        }
    }
}

impl WalletStore for MemoryWalletStore {
    fn load(&self) -> DashboardResult<Option<String>> {
        self.entry
            .read()
            .map(|entry| entry.clone())
            .map_err(|_| DashboardError::Persistence("wallet entry lock poisoned".to_string()))
    }

    fn save(&self, payload: &str) -> DashboardResult<()> {
        let mut entry = self
            .entry
            .write()
            .map_err(|_| DashboardError::Persistence("wallet entry lock poisoned".to_string()))?;
        *entry = Some(payload.to_string());
        Ok(())
    }
}
