//! # chalkmd
//!
//! Application facade over the vault backend. [`ChalkApp`] wires a
//! [`ManagerConfig`] into one shared [`VaultManager`] and the tool groups
//! the desktop shell calls, and [`Command`] is the command set the `chalkmd`
//! binary exposes on top of it.
//!
//! ```no_run
//! use chalkmd::{ChalkApp, Command};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = ChalkApp::new(chalkmd::ManagerConfig::default())?;
//! app.vault.open_vault("~/notes").await?;
//! let listing = app.run(Command::List).await?;
//! println!("{}", serde_json::to_string_pretty(&listing)?);
//! # Ok(())
//! # }
//! ```

pub mod commands;

pub use chalkmd_core::prelude::*;
pub use chalkmd_tools::{AssetTools, FileTools, VaultTools};
pub use chalkmd_vault::{Disposal, VaultManager};
pub use commands::Command;

use std::path::Path;
use std::sync::Arc;

/// One open window's worth of backend state
#[derive(Clone)]
pub struct ChalkApp {
    pub manager: Arc<VaultManager>,
    pub vault: VaultTools,
    pub files: FileTools,
    pub assets: AssetTools,
}

impl ChalkApp {
    /// Build the manager and tool groups from a validated config
    pub fn new(config: ManagerConfig) -> Result<Self> {
        let manager = Arc::new(VaultManager::new(config)?);
        Ok(Self {
            vault: VaultTools::new(manager.clone()),
            files: FileTools::new(manager.clone()),
            assets: AssetTools::new(manager.clone()),
            manager,
        })
    }

    /// Load the config file (defaults when absent) and build the app
    pub async fn from_config_file(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => ManagerConfig::load(path).await?,
            None => ManagerConfig::default(),
        };
        Self::new(config)
    }

    pub fn config(&self) -> &ManagerConfig {
        self.manager.config()
    }
}
