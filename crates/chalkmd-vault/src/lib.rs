//! # Vault Manager
//!
//! Vault-scoped file operations for the chalkmd backend.
//!
//! [`manager::VaultManager`] holds the open vault root and exposes every
//! operation the UI needs: listing, text and binary reads and writes, note
//! and folder creation, delete, rename and move. Each operation checks that
//! a vault is open, then that its path stays inside the root, and only then
//! touches the filesystem.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chalkmd_vault::prelude::*;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let manager = VaultManager::new(ManagerConfig::default())?;
//!     manager.open_vault(Path::new("/path/to/vault")).await?;
//!
//!     manager.write_file(Path::new("notes/new.md"), "# Hello\n").await?;
//!     let content = manager.read_file(Path::new("notes/new.md")).await?;
//!     println!("Content: {}", content);
//!
//!     for entry in manager.list_vault_contents().await? {
//!         println!("{} {}", if entry.is_directory { "d" } else { "-" }, entry.relative_path);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Deletion
//!
//! [`disposal::dispose`] sends targets to the platform recycle bin under
//! [`DeleteMode::Trash`](chalkmd_core::DeleteMode::Trash) and removes them
//! permanently when the trash is unavailable.
//!
//! ## Thread Safety
//!
//! `VaultManager` guards its root with a `tokio::sync::RwLock` and is meant
//! to be shared as `Arc<VaultManager>`. Operations snapshot the root when
//! they start.

pub mod disposal;
pub mod manager;

pub use chalkmd_core::prelude::*;
pub use disposal::Disposal;
pub use manager::VaultManager;

pub mod prelude {
    pub use crate::disposal::Disposal;
    pub use crate::manager::*;
    pub use chalkmd_core::prelude::*;
}
