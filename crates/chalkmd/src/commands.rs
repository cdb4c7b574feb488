//! Commands the `chalkmd` binary runs against an open vault.
//!
//! Every command produces a JSON value so the binary can print results
//! uniformly.

use crate::ChalkApp;
use anyhow::Context;
use chalkmd_core::TreeSort;
use clap::Subcommand;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the open vault root (empty when none is open)
    Path,
    /// Flat listing of every visible entry
    List,
    /// Nested listing sorted for display
    Tree {
        /// name-asc, name-desc, modified-asc or modified-desc
        #[arg(long, default_value_t = TreeSort::NameAsc)]
        sort: TreeSort,
    },
    /// Print a note as text
    Read { path: String },
    /// Write a note; reads the content from stdin when omitted
    Write {
        path: String,
        content: Option<String>,
    },
    /// Print a file as base64
    ReadBinary { path: String },
    /// Decode base64 and write it to a file
    WriteBinary { path: String, data: String },
    /// Create an empty note, appending the note extension if missing
    CreateFile { path: String },
    /// Create a folder and any missing parents
    CreateFolder { path: String },
    /// Create the next free `Untitled` note at the vault root
    NewNote,
    /// Create the next free `Untitled` folder at the vault root
    NewFolder,
    /// Delete a file or folder (trash when configured)
    Delete { path: String },
    /// Rename in place; the destination folder must exist
    Rename { from: String, to: String },
    /// Move, creating destination folders
    Move { from: String, to: String },
}

#[derive(Serialize)]
struct Deleted<'a> {
    path: &'a str,
    disposal: &'static str,
}

#[derive(Serialize)]
struct Relocated<'a> {
    from: &'a str,
    to: &'a str,
}

impl ChalkApp {
    /// Run one command. `Write` without content writes an empty note; the
    /// binary fills it from stdin first.
    pub async fn run(&self, command: Command) -> anyhow::Result<Value> {
        log::debug!("Running {:?}", command);

        let value = match command {
            Command::Path => json!({ "vault": self.vault.get_vault_path().await }),
            Command::List => serde_json::to_value(self.vault.list_vault_contents().await?)?,
            Command::Tree { sort } => serde_json::to_value(self.vault.file_tree(sort).await?)?,
            Command::Read { path } => json!({
                "content": self.files.read_file(&path).await?,
                "path": path,
            }),
            Command::Write { path, content } => {
                let content = content.unwrap_or_default();
                self.files.write_file(&path, &content).await?;
                json!({ "path": path, "bytes": content.len() })
            }
            Command::ReadBinary { path } => json!({
                "data": self.assets.read_binary_file(&path).await?,
                "path": path,
            }),
            Command::WriteBinary { path, data } => {
                self.assets
                    .write_binary_file(&path, &data)
                    .await
                    .with_context(|| format!("Failed to write binary file {}", path))?;
                json!({ "path": path })
            }
            Command::CreateFile { path } => json!({ "path": self.files.create_file(&path).await? }),
            Command::CreateFolder { path } => {
                self.files.create_folder(&path).await?;
                json!({ "path": path })
            }
            Command::NewNote => json!({ "path": self.files.create_untitled_file().await? }),
            Command::NewFolder => json!({ "path": self.files.create_untitled_folder().await? }),
            Command::Delete { path } => {
                let disposal = self.manager.delete_file(Path::new(&path)).await?;
                serde_json::to_value(Deleted {
                    path: &path,
                    disposal: disposal.as_str(),
                })?
            }
            Command::Rename { from, to } => {
                self.files.rename_file(&from, &to).await?;
                serde_json::to_value(Relocated { from: &from, to: &to })?
            }
            Command::Move { from, to } => {
                self.files.move_file(&from, &to).await?;
                serde_json::to_value(Relocated { from: &from, to: &to })?
            }
        };

        Ok(value)
    }
}
