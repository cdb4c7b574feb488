//! File operation tools for the desktop shell

use chalkmd_core::prelude::*;
use chalkmd_vault::VaultManager;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

const UNTITLED: &str = "Untitled";

/// File tools context
#[derive(Clone)]
pub struct FileTools {
    pub manager: Arc<VaultManager>,
}

impl FileTools {
    /// Create new file tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Read a note as text
    pub async fn read_file(&self, path: &str) -> Result<String> {
        self.manager.read_file(Path::new(path)).await
    }

    /// Write a note (creates directories as needed)
    pub async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        self.manager.write_file(Path::new(path), content).await
    }

    /// Create an empty note and return its absolute path
    pub async fn create_file(&self, path: &str) -> Result<String> {
        let created = self.manager.create_file(Path::new(path)).await?;
        Ok(created.to_string_lossy().into_owned())
    }

    /// Create a folder; succeeds if it already exists
    pub async fn create_folder(&self, path: &str) -> Result<()> {
        self.manager.create_folder(Path::new(path)).await
    }

    /// Delete a note or folder; succeeds if it is already gone
    pub async fn delete_file(&self, path: &str) -> Result<()> {
        self.manager.delete_file(Path::new(path)).await.map(|_| ())
    }

    /// Rename in place; the destination folder must exist
    pub async fn rename_file(&self, from: &str, to: &str) -> Result<()> {
        self.manager
            .rename_file(Path::new(from), Path::new(to))
            .await
    }

    /// Move, creating destination folders as needed
    pub async fn move_file(&self, from: &str, to: &str) -> Result<()> {
        self.manager.move_file(Path::new(from), Path::new(to)).await
    }

    /// Create `Untitled.md` at the top of the vault, or the first free
    /// `Untitled N.md`. Returns the vault-relative path of the new note.
    pub async fn create_untitled_file(&self) -> Result<String> {
        let ext = self.manager.config().note_extension.clone();
        let taken = self.top_level_names().await?;
        let name = first_free(&taken, |n| match n {
            0 => format!("{}{}", UNTITLED, ext),
            n => format!("{} {}{}", UNTITLED, n, ext),
        });

        self.manager.create_file(Path::new(&name)).await?;
        log::debug!("Created untitled note {}", name);
        Ok(name)
    }

    /// Create `Untitled` at the top of the vault, or the first free
    /// `Untitled N`. Returns the folder name.
    pub async fn create_untitled_folder(&self) -> Result<String> {
        let taken = self.top_level_names().await?;
        let name = first_free(&taken, |n| match n {
            0 => UNTITLED.to_string(),
            n => format!("{} {}", UNTITLED, n),
        });

        self.manager.create_folder(Path::new(&name)).await?;
        Ok(name)
    }

    /// Lowercased names of all top-level entries
    async fn top_level_names(&self) -> Result<HashSet<String>> {
        Ok(self
            .manager
            .list_vault_contents()
            .await?
            .into_iter()
            .filter(|e| e.depth() == 1)
            .map(|e| e.name.to_lowercase())
            .collect())
    }
}

fn first_free(taken: &HashSet<String>, candidate: impl Fn(u32) -> String) -> String {
    (0..)
        .map(candidate)
        .find(|name| !taken.contains(&name.to_lowercase()))
        .unwrap_or_else(|| UNTITLED.to_string())
}
