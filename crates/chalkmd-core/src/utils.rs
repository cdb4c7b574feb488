//! Path helpers shared by the vault manager and the tools layer.
//!
//! Containment is decided on lexically normalized paths: `.` segments are
//! dropped and `..` pops the previous segment, without touching the disk.

use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Path validation helpers
pub struct PathValidator;

impl PathValidator {
    /// Normalize an absolute path lexically (no symlink resolution, no I/O).
    ///
    /// `..` at the filesystem root stays at the root.
    pub fn normalize(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(p) => normalized.push(p.as_os_str()),
                Component::RootDir => normalized.push(component),
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::Normal(name) => normalized.push(name),
            }
        }
        normalized
    }

    /// Join a vault-relative path onto `vault_root` and normalize the result.
    ///
    /// Leading root or drive components in `relative` are ignored, so
    /// `/notes/a.md` means `<root>/notes/a.md`.
    pub fn join_lexically(vault_root: &Path, relative: &Path) -> PathBuf {
        let mut joined = vault_root.to_path_buf();
        for component in relative.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir => {
                    joined.pop();
                }
                Component::Normal(name) => joined.push(name),
            }
        }
        joined
    }

    /// Resolve `relative` against `vault_root`, rejecting anything that
    /// lexically escapes the root. The root itself is accepted.
    pub fn validate_path_in_vault(vault_root: &Path, relative: &Path) -> Result<PathBuf> {
        let full_path = Self::join_lexically(vault_root, relative);
        Self::ensure_contained(vault_root, &full_path)?;
        Ok(full_path)
    }

    /// Component-wise check that an already-normalized absolute path lies
    /// within `vault_root` (or is the root itself).
    pub fn ensure_contained(vault_root: &Path, full_path: &Path) -> Result<()> {
        if !full_path.starts_with(vault_root) {
            return Err(Error::outside_vault(full_path));
        }
        Ok(())
    }

    /// Check containment after resolving symlinks.
    ///
    /// Non-existent tails are kept as-is and appended to the canonical form of
    /// their deepest existing ancestor.
    pub fn validate_canonical(vault_root: &Path, full_path: &Path) -> Result<()> {
        let canonical_root = Self::canonicalize_existing(vault_root);
        let canonical_full = Self::canonicalize_existing(full_path);
        if !canonical_full.starts_with(&canonical_root) {
            return Err(Error::outside_vault(full_path));
        }
        Ok(())
    }

    fn canonicalize_existing(path: &Path) -> PathBuf {
        let mut existing = path;
        let mut tail = Vec::new();
        loop {
            if let Ok(canonical) = existing.canonicalize() {
                return tail
                    .iter()
                    .rev()
                    .fold(canonical, |acc: PathBuf, part| acc.join(part));
            }
            match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    existing = parent;
                }
                _ => return path.to_path_buf(),
            }
        }
    }

    /// Append `extension` unless the path already ends with it
    pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
        if path.as_os_str().to_string_lossy().ends_with(extension) {
            return path.to_path_buf();
        }
        let mut raw: OsString = path.as_os_str().to_os_string();
        raw.push(extension);
        PathBuf::from(raw)
    }

    /// Express `path` relative to `vault_root` with `/` separators
    pub fn relative_string(vault_root: &Path, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(vault_root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(parts.join("/"))
    }
}
