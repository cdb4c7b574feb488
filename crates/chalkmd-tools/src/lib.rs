//! # chalkmd Tools
//!
//! The operation surface the desktop shell calls. Every method takes plain
//! strings and returns plain values (strings, unit, [`DirectoryEntry`]
//! listings), delegating to a shared [`VaultManager`].
//!
//! ## Tool Groups
//!
//! - [`vault_tools::VaultTools`] - open a vault, report its path, list and
//!   build the sidebar tree
//! - [`file_tools::FileTools`] - read, write, create, delete, rename and move
//!   notes and folders
//! - [`asset_tools::AssetTools`] - base64 reads and writes for binary assets
//!
//! ## Example
//!
//! ```no_run
//! use chalkmd_tools::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let manager = Arc::new(VaultManager::new(ManagerConfig::default())?);
//! let vault = VaultTools::new(manager.clone());
//! let files = FileTools::new(manager);
//!
//! vault.open_vault("~/notes").await?;
//! let created = files.create_file("inbox/today").await?;
//! assert!(created.ends_with("today.md"));
//! # Ok(())
//! # }
//! ```

pub mod asset_tools;
pub mod file_tools;
pub mod vault_tools;

pub use asset_tools::AssetTools;
pub use chalkmd_core::prelude::*;
pub use chalkmd_vault::VaultManager;
pub use file_tools::FileTools;
pub use vault_tools::VaultTools;

pub mod prelude {
    pub use crate::asset_tools::AssetTools;
    pub use crate::file_tools::FileTools;
    pub use crate::vault_tools::VaultTools;
    pub use chalkmd_core::prelude::*;
    pub use chalkmd_vault::VaultManager;
}
