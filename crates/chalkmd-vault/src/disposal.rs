//! Removal of vault entries, through the platform recycle bin when possible.

use chalkmd_core::{DeleteMode, Error, Result};
use std::io;
use std::path::{Path, PathBuf};

/// What happened to a deleted path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposal {
    /// Moved to the platform trash
    Trashed,
    /// Removed permanently
    Removed,
    /// Nothing existed at the path
    AlreadyGone,
}

impl Disposal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trashed => "trashed",
            Self::Removed => "removed",
            Self::AlreadyGone => "already-gone",
        }
    }
}

/// Delete `path` (file, symlink or directory tree) according to `mode`.
///
/// In [`DeleteMode::Trash`] a failing trash move falls back to permanent
/// removal, so platforms without a usable recycle bin still delete.
pub async fn dispose(path: &Path, mode: DeleteMode) -> Result<Disposal> {
    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Disposal::AlreadyGone),
        Err(e) => return Err(Error::io("delete", path, e)),
    };

    if mode == DeleteMode::Trash {
        match move_to_trash(path.to_path_buf()).await {
            Ok(()) => return Ok(Disposal::Trashed),
            Err(reason) => {
                log::warn!(
                    "Trash unavailable for {} ({}), deleting permanently",
                    path.display(),
                    reason
                );
            }
        }
    }

    let removed = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    match removed {
        Ok(()) => Ok(Disposal::Removed),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Disposal::AlreadyGone),
        Err(e) => Err(Error::io("delete", path, e)),
    }
}

async fn move_to_trash(path: PathBuf) -> std::result::Result<(), String> {
    tokio::task::spawn_blocking(move || trash::delete(&path))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
}
