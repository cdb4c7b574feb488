//! Vault manager: the open vault root and every operation scoped to it

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chalkmd_core::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

use crate::disposal::{self, Disposal};

/// Distinguishes temp files of overlapping writes to the same note
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Holds the currently open vault root and performs vault-relative file
/// operations against it.
///
/// Every path-taking operation snapshots the root at entry, resolves the
/// relative path against that snapshot and rejects anything outside it
/// before touching the filesystem. Opening another vault while an operation
/// is running does not affect that operation.
pub struct VaultManager {
    config: ManagerConfig,
    root: RwLock<Option<PathBuf>>,
}

impl VaultManager {
    /// Create a manager with no vault open
    pub fn new(config: ManagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            root: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Open `path` as the vault root, replacing any previous one.
    ///
    /// Relative paths are resolved against the working directory; the stored
    /// root is lexically normalized.
    #[instrument(skip(self), fields(vault = %path.display()), name = "vault_open")]
    pub async fn open_vault(&self, path: &Path) -> Result<()> {
        let absolute = std::path::absolute(path).map_err(|source| Error::VaultNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let root = PathValidator::normalize(&absolute);

        let metadata = tokio::fs::metadata(&root)
            .await
            .map_err(|source| Error::VaultNotFound {
                path: root.clone(),
                source,
            })?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory { path: root });
        }

        let previous = self.root.write().await.replace(root.clone());
        match previous {
            Some(prev) if prev != root => {
                log::info!("Switched vault {} -> {}", prev.display(), root.display())
            }
            Some(_) => log::debug!("Vault {} reopened", root.display()),
            None => log::info!("Opened vault {}", root.display()),
        }
        Ok(())
    }

    /// Current vault root, `None` when no vault is open
    pub async fn vault_path(&self) -> Option<PathBuf> {
        self.root.read().await.clone()
    }

    /// Snapshot of the root, or `NoVaultOpen`
    async fn current_root(&self) -> Result<PathBuf> {
        self.root.read().await.clone().ok_or(Error::NoVaultOpen)
    }

    /// Resolve a vault-relative path against the open vault
    pub async fn resolve_path(&self, relative: &Path) -> Result<PathBuf> {
        let root = self.current_root().await?;
        self.resolve_in(&root, relative)
    }

    fn resolve_in(&self, root: &Path, relative: &Path) -> Result<PathBuf> {
        let full_path = PathValidator::validate_path_in_vault(root, relative)?;
        self.check_canonical(root, &full_path)?;
        Ok(full_path)
    }

    fn check_canonical(&self, root: &Path, full_path: &Path) -> Result<()> {
        if self.config.containment == ContainmentMode::Canonical {
            PathValidator::validate_canonical(root, full_path)?;
        }
        Ok(())
    }

    /// Every visible file and directory under the vault root, in walk order.
    ///
    /// Names starting with `.` are skipped, and so is everything below a
    /// hidden directory. The root itself is never listed.
    #[instrument(skip(self), name = "vault_list")]
    pub async fn list_vault_contents(&self) -> Result<Vec<DirectoryEntry>> {
        let root = self.current_root().await?;
        let walk_root = root.clone();
        let entries = tokio::task::spawn_blocking(move || walk(&walk_root))
            .await
            .map_err(|e| Error::io("list vault contents", &root, io::Error::other(e)))??;

        log::debug!("Listed {} entries in {}", entries.len(), root.display());
        Ok(entries)
    }

    /// Read a file as text. Invalid UTF-8 sequences become U+FFFD.
    #[instrument(skip(self), fields(file = ?path), name = "vault_read_file")]
    pub async fn read_file(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve_path(path).await?;
        let bytes = tokio::fs::read(&full_path)
            .await
            .map_err(|e| Error::read_io("read file", &full_path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a file's raw bytes, standard-base64 encoded
    #[instrument(skip(self), fields(file = ?path), name = "vault_read_binary_file")]
    pub async fn read_binary_file(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve_path(path).await?;
        let bytes = tokio::fs::read(&full_path)
            .await
            .map_err(|e| Error::read_io("read file", &full_path, e))?;
        Ok(BASE64.encode(bytes))
    }

    /// Write text, creating parent directories and replacing any existing file
    #[instrument(skip(self, content), fields(file = ?path, size = content.len()), name = "vault_write_file")]
    pub async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let full_path = self.resolve_path(path).await?;
        ensure_parent(&full_path).await?;
        write_replacing(&full_path, content.as_bytes()).await
    }

    /// Decode a base64 payload and write the bytes.
    ///
    /// A malformed payload is rejected before anything on disk changes.
    #[instrument(skip(self, encoded), fields(file = ?path, encoded_len = encoded.len()), name = "vault_write_binary_file")]
    pub async fn write_binary_file(&self, path: &Path, encoded: &str) -> Result<()> {
        let full_path = self.resolve_path(path).await?;
        let bytes = BASE64.decode(encoded).map_err(|source| Error::Decode {
            path: full_path.clone(),
            source,
        })?;
        ensure_parent(&full_path).await?;
        write_replacing(&full_path, &bytes).await
    }

    /// Create an empty note, returning its absolute path.
    ///
    /// The configured note extension is appended when missing. An existing
    /// file at the final path is truncated.
    #[instrument(skip(self), fields(file = ?path), name = "vault_create_file")]
    pub async fn create_file(&self, path: &Path) -> Result<PathBuf> {
        let root = self.current_root().await?;
        let full_path = self.resolve_in(&root, path)?;
        let note_path = PathValidator::ensure_extension(&full_path, &self.config.note_extension);
        PathValidator::ensure_contained(&root, &note_path)?;
        self.check_canonical(&root, &note_path)?;

        ensure_parent(&note_path).await?;
        tokio::fs::write(&note_path, b"")
            .await
            .map_err(|e| Error::io("create file", &note_path, e))?;

        log::debug!("Created note {}", note_path.display());
        Ok(note_path)
    }

    /// Create a folder and any missing parents; existing folders are fine
    #[instrument(skip(self), fields(folder = ?path), name = "vault_create_folder")]
    pub async fn create_folder(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve_path(path).await?;
        tokio::fs::create_dir_all(&full_path)
            .await
            .map_err(|e| Error::io("create folder", &full_path, e))
    }

    /// Delete a file or directory tree. A missing target is not an error.
    #[instrument(skip(self), fields(file = ?path, mode = ?self.config.delete_mode), name = "vault_delete")]
    pub async fn delete_file(&self, path: &Path) -> Result<Disposal> {
        let full_path = self.resolve_path(path).await?;
        let outcome = disposal::dispose(&full_path, self.config.delete_mode).await?;
        log::debug!("Deleted {}: {:?}", full_path.display(), outcome);
        Ok(outcome)
    }

    /// Rename within the vault. The destination's parent must already exist.
    #[instrument(skip(self), fields(from = ?from, to = ?to), name = "vault_rename")]
    pub async fn rename_file(&self, from: &Path, to: &Path) -> Result<()> {
        self.relocate(from, to, false).await
    }

    /// Move within the vault, creating the destination's parents as needed
    #[instrument(skip(self), fields(from = ?from, to = ?to), name = "vault_move")]
    pub async fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        self.relocate(from, to, true).await
    }

    async fn relocate(&self, from: &Path, to: &Path, create_parents: bool) -> Result<()> {
        let root = self.current_root().await?;
        let from_path = self.resolve_in(&root, from)?;
        let to_path = self.resolve_in(&root, to)?;

        if create_parents {
            ensure_parent(&to_path).await?;
        }

        let op = if create_parents { "move" } else { "rename" };
        tokio::fs::rename(&from_path, &to_path)
            .await
            .map_err(|e| Error::io(op, &from_path, e))?;

        log::debug!(
            "{} {} -> {}",
            op,
            from_path.display(),
            to_path.display()
        );
        Ok(())
    }
}

fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
}

fn walk(root: &Path) -> Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();

    for item in WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(is_visible)
    {
        let item = item.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io("list vault contents", path, e.into())
        })?;

        let metadata = item
            .metadata()
            .map_err(|e| Error::io("list vault contents", item.path(), e.into()))?;
        let modified = metadata
            .modified()
            .map_err(|e| Error::io("list vault contents", item.path(), e))?;
        let Some(relative_path) = PathValidator::relative_string(root, item.path()) else {
            continue;
        };

        entries.push(DirectoryEntry {
            name: item.file_name().to_string_lossy().into_owned(),
            relative_path,
            is_directory: item.file_type().is_dir(),
            modified_at: DirectoryEntry::format_timestamp(modified),
        });
    }

    Ok(entries)
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io("create directory", parent, e))?;
    }
    Ok(())
}

/// The file a write to `path` should land in: the link target when `path`
/// is a symlink, `path` itself otherwise.
async fn write_target(path: &Path) -> PathBuf {
    match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.file_type().is_symlink() => {
            if let Ok(resolved) = tokio::fs::canonicalize(path).await {
                return resolved;
            }
            // Dangling link: create the file it names
            match (tokio::fs::read_link(path).await, path.parent()) {
                (Ok(link), Some(parent)) => parent.join(link),
                _ => path.to_path_buf(),
            }
        }
        _ => path.to_path_buf(),
    }
}

/// Write to a hidden sibling of the target, then rename it over the target.
/// Symlinks are written through, never replaced.
async fn write_replacing(path: &Path, data: &[u8]) -> Result<()> {
    let target = write_target(path).await;
    let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
        return Err(Error::io(
            "write file",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(
        ".{}.{}-{}.chalkmd-tmp",
        name.to_string_lossy(),
        std::process::id(),
        seq
    ));

    if let Err(e) = tokio::fs::write(&temp_path, data).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(Error::io("write file", path, e));
    }

    if let Err(e) = tokio::fs::rename(&temp_path, &target).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(Error::io("write file", path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_config() -> ManagerConfig {
        ManagerConfig::builder()
            .delete_mode(DeleteMode::Permanent)
            .build()
            .unwrap()
    }

    async fn open_manager(dir: &Path) -> VaultManager {
        let manager = VaultManager::new(test_config()).unwrap();
        manager.open_vault(dir).await.unwrap();
        manager
    }

    #[tokio::test]
    async fn test_new_manager_has_no_vault() {
        let manager = VaultManager::new(test_config()).unwrap();
        assert!(manager.vault_path().await.is_none());
        assert!(matches!(
            manager.read_file(Path::new("a.md")).await,
            Err(Error::NoVaultOpen)
        ));
        assert!(matches!(
            manager.list_vault_contents().await,
            Err(Error::NoVaultOpen)
        ));
    }

    #[tokio::test]
    async fn test_no_vault_checked_before_containment() {
        let manager = VaultManager::new(test_config()).unwrap();
        assert!(matches!(
            manager.write_file(Path::new("../escape.md"), "x").await,
            Err(Error::NoVaultOpen)
        ));
    }

    #[tokio::test]
    async fn test_open_vault_errors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = VaultManager::new(test_config()).unwrap();

        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            manager.open_vault(&missing).await,
            Err(Error::VaultNotFound { .. })
        ));

        let file = temp_dir.path().join("file.md");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            manager.open_vault(&file).await,
            Err(Error::NotADirectory { .. })
        ));

        assert!(manager.vault_path().await.is_none());
    }

    #[tokio::test]
    async fn test_open_vault_normalizes_root() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("sub")).unwrap();
        let manager = VaultManager::new(test_config()).unwrap();

        let messy = temp_dir.path().join("sub").join("..").join(".");
        manager.open_vault(&messy).await.unwrap();
        assert_eq!(manager.vault_path().await.unwrap(), temp_dir.path());
    }

    #[tokio::test]
    async fn test_write_and_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let path = Path::new("test.md");
        let content = "# Test Note\nHello world";
        manager.write_file(path, content).await.unwrap();
        assert_eq!(manager.read_file(path).await.unwrap(), content);

        manager.write_file(path, "").await.unwrap();
        assert_eq!(manager.read_file(path).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_write_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let path = Path::new("notes/subfolder/test.md");
        manager.write_file(path, "Nested file").await.unwrap();
        assert_eq!(manager.read_file(path).await.unwrap(), "Nested file");
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        manager.write_file(Path::new("a.md"), "one").await.unwrap();
        manager.write_file(Path::new("a.md"), "two").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md".to_string()]);
    }

    #[tokio::test]
    async fn test_write_over_directory_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("folder")).unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let err = manager
            .write_file(Path::new("folder"), "text")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["folder".to_string()]);
    }

    #[tokio::test]
    async fn test_overlapping_writes_to_one_note() {
        let temp_dir = TempDir::new().unwrap();
        let manager = Arc::new(open_manager(temp_dir.path()).await);

        let writers: Vec<_> = (0..16)
            .map(|i| {
                let manager = manager.clone();
                tokio::spawn(async move {
                    manager
                        .write_file(Path::new("busy.md"), &format!("version {}", i))
                        .await
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let content = manager.read_file(Path::new("busy.md")).await.unwrap();
        assert!(content.starts_with("version "));
        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["busy.md".to_string()]);
    }

    #[tokio::test]
    async fn test_read_invalid_utf8_is_lossy() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("latin1.md"), b"caf\xe9 notes").unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let content = manager.read_file(Path::new("latin1.md")).await.unwrap();
        assert_eq!(content, "caf\u{FFFD} notes");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_through_symlink() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("real.md"), "old").unwrap();
        std::os::unix::fs::symlink("real.md", temp_dir.path().join("alias.md")).unwrap();
        let manager = open_manager(temp_dir.path()).await;

        manager.write_file(Path::new("alias.md"), "new").await.unwrap();

        let alias = temp_dir.path().join("alias.md");
        assert!(std::fs::symlink_metadata(&alias).unwrap().file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("real.md")).unwrap(),
            "new"
        );
        assert_eq!(manager.read_file(Path::new("alias.md")).await.unwrap(), "new");

        let mut names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["alias.md".to_string(), "real.md".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_through_dangling_symlink() {
        let temp_dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink("later.md", temp_dir.path().join("link.md")).unwrap();
        let manager = open_manager(temp_dir.path()).await;

        manager.write_file(Path::new("link.md"), "made").await.unwrap();
        assert!(
            std::fs::symlink_metadata(temp_dir.path().join("link.md"))
                .unwrap()
                .file_type()
                .is_symlink()
        );
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("later.md")).unwrap(),
            "made"
        );
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let err = manager.read_file(Path::new("nope.md")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = manager
            .read_binary_file(Path::new("nope.png"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_path_traversal_prevention() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let bad_path = Path::new("../../../etc/passwd");
        let err = manager.read_file(bad_path).await.unwrap_err();
        assert!(err.to_string().contains("outside vault"));
    }

    #[tokio::test]
    async fn test_binary_decode_error_before_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let err = manager
            .write_binary_file(Path::new("assets/img.png"), "not base64!!")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(!temp_dir.path().join("assets").exists());
    }

    #[tokio::test]
    async fn test_binary_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let bytes: Vec<u8> = (0..=255).collect();
        manager
            .write_binary_file(Path::new("blob.bin"), &BASE64.encode(&bytes))
            .await
            .unwrap();
        let read = manager.read_binary_file(Path::new("blob.bin")).await.unwrap();
        assert_eq!(BASE64.decode(read).unwrap(), bytes);
        assert_eq!(std::fs::read(temp_dir.path().join("blob.bin")).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_create_file_extension_rule() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let created = manager.create_file(Path::new("notes")).await.unwrap();
        assert_eq!(created, temp_dir.path().join("notes.md"));

        let created = manager.create_file(Path::new("notes.md")).await.unwrap();
        assert_eq!(created, temp_dir.path().join("notes.md"));
        assert_eq!(std::fs::read(&created).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_create_file_truncates_existing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;
        std::fs::write(temp_dir.path().join("keep.md"), "content").unwrap();

        manager.create_file(Path::new("keep")).await.unwrap();
        assert_eq!(std::fs::read_to_string(temp_dir.path().join("keep.md")).unwrap(), "");
    }

    #[tokio::test]
    async fn test_create_file_at_root_is_outside_vault() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;

        let err = manager.create_file(Path::new("")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutsideVault);
    }

    #[tokio::test]
    async fn test_custom_note_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config = ManagerConfig::builder()
            .note_extension(".markdown")
            .build()
            .unwrap();
        let manager = VaultManager::new(config).unwrap();
        manager.open_vault(temp_dir.path()).await.unwrap();

        let created = manager.create_file(Path::new("idea")).await.unwrap();
        assert_eq!(created, temp_dir.path().join("idea.markdown"));
    }

    #[tokio::test]
    async fn test_list_skips_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("file1.md"), "1").unwrap();
        std::fs::write(root.join("file2.txt"), "2").unwrap();
        std::fs::create_dir(root.join("folder1")).unwrap();
        std::fs::write(root.join("folder1/nested.md"), "n").unwrap();
        std::fs::write(root.join(".hidden"), "h").unwrap();
        std::fs::create_dir(root.join(".hiddendir")).unwrap();
        std::fs::write(root.join(".hiddendir/visible-looking.md"), "v").unwrap();

        let manager = open_manager(root).await;
        let entries = manager.list_vault_contents().await.unwrap();

        let paths: HashSet<_> = entries.iter().map(|e| e.relative_path.as_str()).collect();
        assert_eq!(entries.len(), 4);
        assert_eq!(
            paths,
            HashSet::from(["file1.md", "file2.txt", "folder1", "folder1/nested.md"])
        );

        let folder = entries.iter().find(|e| e.name == "folder1").unwrap();
        assert!(folder.is_directory);
        assert!(folder.modified().is_some());
    }

    #[tokio::test]
    async fn test_list_hidden_vault_root_still_lists() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".notes");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("a.md"), "a").unwrap();

        let manager = open_manager(&root).await;
        let entries = manager.list_vault_contents().await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_list_after_root_removed_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("vault");
        std::fs::create_dir(&root).unwrap();

        let manager = open_manager(&root).await;
        std::fs::remove_dir(&root).unwrap();

        let err = manager.list_vault_contents().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[tokio::test]
    async fn test_rename_requires_existing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;
        manager.write_file(Path::new("a.md"), "body").await.unwrap();

        let err = manager
            .rename_file(Path::new("a.md"), Path::new("missing/b.md"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!temp_dir.path().join("missing").exists());
        assert!(temp_dir.path().join("a.md").exists());

        manager
            .rename_file(Path::new("a.md"), Path::new("b.md"))
            .await
            .unwrap();
        assert_eq!(manager.read_file(Path::new("b.md")).await.unwrap(), "body");
        assert!(!temp_dir.path().join("a.md").exists());
    }

    #[tokio::test]
    async fn test_move_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;
        manager.write_file(Path::new("a.md"), "body").await.unwrap();

        manager
            .move_file(Path::new("a.md"), Path::new("x/y/a.md"))
            .await
            .unwrap();
        assert_eq!(manager.read_file(Path::new("x/y/a.md")).await.unwrap(), "body");
        assert!(!temp_dir.path().join("a.md").exists());
    }

    #[tokio::test]
    async fn test_relocate_checks_both_sides_first() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;
        manager.write_file(Path::new("a.md"), "body").await.unwrap();

        let err = manager
            .move_file(Path::new("a.md"), Path::new("../../out/a.md"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutsideVault);
        assert!(temp_dir.path().join("a.md").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open_manager(temp_dir.path()).await;
        let outcome = manager.delete_file(Path::new("ghost.md")).await.unwrap();
        assert_eq!(outcome, Disposal::AlreadyGone);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_canonical_mode_blocks_symlink_escape() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.md"), "secret").unwrap();
        let vault = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), vault.path().join("link")).unwrap();

        let lexical = open_manager(vault.path()).await;
        assert_eq!(
            lexical.read_file(Path::new("link/secret.md")).await.unwrap(),
            "secret"
        );

        let config = ManagerConfig::builder()
            .containment(ContainmentMode::Canonical)
            .build()
            .unwrap();
        let canonical = VaultManager::new(config).unwrap();
        canonical.open_vault(vault.path()).await.unwrap();
        let err = canonical
            .read_file(Path::new("link/secret.md"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutsideVault);
    }

    #[tokio::test]
    async fn test_switching_vaults_mid_flight() {
        let vault_a = TempDir::new().unwrap();
        let vault_b = TempDir::new().unwrap();
        let manager = Arc::new(open_manager(vault_a.path()).await);

        let mut tasks = Vec::new();
        for i in 0..32 {
            let manager = Arc::clone(&manager);
            tasks.push(tokio::spawn(async move {
                let path = PathBuf::from(format!("note-{}.md", i));
                manager.write_file(&path, "content").await
            }));
        }
        let switcher = {
            let manager = Arc::clone(&manager);
            let b = vault_b.path().to_path_buf();
            tokio::spawn(async move { manager.open_vault(&b).await })
        };

        for task in tasks {
            task.await.unwrap().unwrap();
        }
        switcher.await.unwrap().unwrap();

        // Each write landed whole in exactly one vault
        for i in 0..32 {
            let name = format!("note-{}.md", i);
            let in_a = vault_a.path().join(&name).exists();
            let in_b = vault_b.path().join(&name).exists();
            assert!(in_a ^ in_b, "{} in a: {}, in b: {}", name, in_a, in_b);
        }
        assert_eq!(manager.vault_path().await.unwrap(), vault_b.path());
    }
}
