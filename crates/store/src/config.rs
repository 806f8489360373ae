//! Store backend configuration.

use std::path::PathBuf;

use tally_shared::config::StorageConfig;

/// Backend holding the invoice document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProvider {
    /// Local filesystem directory.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// Process memory; contents vanish with the store.
    Memory,
}

impl StoreProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for log output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

impl From<&StorageConfig> for StoreProvider {
    fn from(config: &StorageConfig) -> Self {
        Self::local_fs(config.root.clone())
    }
}
