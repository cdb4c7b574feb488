//! Vault selection and listing tools
//!
//! Opens the vault chosen in the folder picker and serves the listing the
//! sidebar renders.

use chalkmd_core::prelude::*;
use chalkmd_vault::VaultManager;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Vault-level operations
#[derive(Clone)]
pub struct VaultTools {
    pub manager: Arc<VaultManager>,
}

impl VaultTools {
    /// Create new vault tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Open a vault directory (supports `~` and `$VAR` expansion)
    ///
    /// # Errors
    /// - `VaultNotFound` if the path does not exist or cannot be expanded
    /// - `NotADirectory` if it exists but is a file
    pub async fn open_vault(&self, path: &str) -> Result<()> {
        let expanded = Self::expand_path(path)?;
        self.manager.open_vault(&expanded).await
    }

    /// Current vault root, or an empty string when no vault is open
    pub async fn get_vault_path(&self) -> String {
        self.manager
            .vault_path()
            .await
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Flat listing of every visible entry in the vault, in walk order
    pub async fn list_vault_contents(&self) -> Result<Vec<DirectoryEntry>> {
        self.manager.list_vault_contents().await
    }

    /// The listing nested by directory and sorted for display
    pub async fn file_tree(&self, sort: TreeSort) -> Result<Vec<FileTreeNode>> {
        let entries = self.manager.list_vault_contents().await?;
        let mut tree = build_file_tree(&entries);
        sort_file_tree(&mut tree, sort);
        Ok(tree)
    }

    /// Expand tilde and environment variables
    fn expand_path(path: &str) -> Result<PathBuf> {
        let expanded = shellexpand::full(path).map_err(|e| Error::VaultNotFound {
            path: PathBuf::from(path),
            source: io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
        })?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}
