//! Binary asset tools (images pasted into notes, attachments)
//!
//! Bytes cross the UI boundary as standard base64 text.

use chalkmd_core::Result;
use chalkmd_vault::VaultManager;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct AssetTools {
    pub manager: Arc<VaultManager>,
}

impl AssetTools {
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Read an asset as base64
    pub async fn read_binary_file(&self, path: &str) -> Result<String> {
        self.manager.read_binary_file(Path::new(path)).await
    }

    /// Decode base64 and write the asset, creating directories as needed
    pub async fn write_binary_file(&self, path: &str, encoded: &str) -> Result<()> {
        self.manager.write_binary_file(Path::new(path), encoded).await
    }
}
