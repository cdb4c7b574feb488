//! Core data models for vault listings.
//!
//! Field names on the wire match what the front-end reads
//! (`name`, `path`, `isDir`, `modified`).

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use crate::error::{Error, Result};

/// One file or directory inside the open vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Final path segment
    pub name: String,
    /// Path relative to the vault root, `/`-separated
    #[serde(rename = "path")]
    pub relative_path: String,
    #[serde(rename = "isDir")]
    pub is_directory: bool,
    /// RFC 3339, second precision
    #[serde(rename = "modified")]
    pub modified_at: String,
}

impl DirectoryEntry {
    /// Format a filesystem timestamp the way listings carry it
    pub fn format_timestamp(time: SystemTime) -> String {
        DateTime::<Local>::from(time).to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Parsed modification time, if the stored string is valid RFC 3339
    pub fn modified(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.modified_at).ok()
    }

    /// Number of `/`-separated segments in the relative path
    pub fn depth(&self) -> usize {
        self.relative_path.split('/').filter(|s| !s.is_empty()).count()
    }
}

/// A listing entry nested under its parent directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeNode {
    #[serde(flatten)]
    pub entry: DirectoryEntry,
    /// `Some` for directories (possibly empty), `None` for files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileTreeNode>>,
}

impl FileTreeNode {
    pub fn new(entry: DirectoryEntry) -> Self {
        let children = entry.is_directory.then(Vec::new);
        Self { entry, children }
    }
}

/// Sibling ordering for the file tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TreeSort {
    #[default]
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
    #[serde(rename = "modified-asc")]
    ModifiedAsc,
    #[serde(rename = "modified-desc")]
    ModifiedDesc,
}

impl TreeSort {
    pub fn is_descending(self) -> bool {
        matches!(self, TreeSort::NameDesc | TreeSort::ModifiedDesc)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TreeSort::NameAsc => "name-asc",
            TreeSort::NameDesc => "name-desc",
            TreeSort::ModifiedAsc => "modified-asc",
            TreeSort::ModifiedDesc => "modified-desc",
        }
    }
}

impl fmt::Display for TreeSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreeSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name-asc" => Ok(TreeSort::NameAsc),
            "name-desc" => Ok(TreeSort::NameDesc),
            "modified-asc" => Ok(TreeSort::ModifiedAsc),
            "modified-desc" => Ok(TreeSort::ModifiedDesc),
            other => Err(Error::config_error(format!(
                "unknown sort '{}', expected one of name-asc, name-desc, modified-asc, modified-desc",
                other
            ))),
        }
    }
}
