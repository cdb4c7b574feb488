//! # chalkmd Core
//!
//! Core data models, error types, and configuration for the chalkmd vault
//! backend. This crate defines the canonical types that all other crates
//! depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Listing types ([`DirectoryEntry`], [`FileTreeNode`], [`TreeSort`])
//! - [`error`] - Error enum and Result alias
//! - [`config`] - Manager configuration (delete policy, containment mode)
//! - [`utils`] - Lexical path normalization and vault containment checks
//! - [`tree`] - Building and sorting the sidebar file tree
//!
//! ## Error Handling
//!
//! ```
//! use chalkmd_core::prelude::*;
//!
//! fn check(path: &str) -> Result<()> {
//!     if path.starts_with("..") {
//!         return Err(Error::outside_vault(path));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(check("../x").unwrap_err().kind(), ErrorKind::OutsideVault);
//! ```
//!
//! ## Containment
//!
//! ```
//! use chalkmd_core::PathValidator;
//! use std::path::Path;
//!
//! let root = Path::new("/vault");
//! assert!(PathValidator::validate_path_in_vault(root, Path::new("notes/a.md")).is_ok());
//! assert!(PathValidator::validate_path_in_vault(root, Path::new("../etc/passwd")).is_err());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod tree;
pub mod utils;

pub use config::*;
pub use error::{Error, ErrorKind, Result};
pub use models::*;
pub use tree::{build_file_tree, natural_cmp, sort_file_tree};
pub use utils::PathValidator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ContainmentMode, DeleteMode, ManagerConfig};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::models::{DirectoryEntry, FileTreeNode, TreeSort};
    pub use crate::tree::{build_file_tree, sort_file_tree};
    pub use crate::utils::PathValidator;
}
