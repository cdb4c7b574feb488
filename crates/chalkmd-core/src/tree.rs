//! File tree assembly and ordering for the sidebar.
//!
//! `list_vault_contents` returns a flat listing in walk order. These helpers
//! turn it into the nested, sorted structure the file tree renders.

use crate::models::{DirectoryEntry, FileTreeNode, TreeSort};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

lazy_static! {
    /// `Untitled 3.md` -> base `Untitled`, number `3`, extension `.md`
    static ref NUMBERED_NAME: Regex =
        Regex::new(r"^(.+?)( \d+)?(\.\w+)?$").expect("numbered name pattern is valid");
}

/// Nest a flat listing under its directories.
///
/// Entries whose parent directory is not part of the listing stay at the top
/// level. Backslash separators are normalized to `/`.
pub fn build_file_tree(entries: &[DirectoryEntry]) -> Vec<FileTreeNode> {
    let mut entries: Vec<DirectoryEntry> = entries
        .iter()
        .cloned()
        .map(|mut e| {
            e.relative_path = e.relative_path.replace('\\', "/");
            e
        })
        .collect();
    entries.sort_by(|a, b| natural_cmp(&a.relative_path, &b.relative_path));

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    let mut roots = Vec::new();

    for i in 0..entries.len() {
        let path = entries[i].relative_path.clone();
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if let Some(last) = parts.last() {
            entries[i].name = (*last).to_string();
        }

        let parent = if parts.len() > 1 {
            index
                .get(&parts[..parts.len() - 1].join("/"))
                .copied()
                .filter(|&p| entries[p].is_directory)
        } else {
            None
        };
        index.insert(path, i);

        match parent {
            Some(p) => children[p].push(i),
            None => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|i| assemble(i, &entries, &children))
        .collect()
}

fn assemble(i: usize, entries: &[DirectoryEntry], children: &[Vec<usize>]) -> FileTreeNode {
    let mut node = FileTreeNode::new(entries[i].clone());
    if let Some(kids) = node.children.as_mut() {
        kids.extend(children[i].iter().map(|&c| assemble(c, entries, children)));
    }
    node
}

/// Sort siblings recursively. Directories always come before files.
pub fn sort_file_tree(nodes: &mut [FileTreeNode], sort: TreeSort) {
    nodes.sort_by(|a, b| compare_nodes(&a.entry, &b.entry, sort));
    for node in nodes.iter_mut() {
        if let Some(kids) = node.children.as_mut() {
            sort_file_tree(kids, sort);
        }
    }
}

fn compare_nodes(a: &DirectoryEntry, b: &DirectoryEntry, sort: TreeSort) -> Ordering {
    match (a.is_directory, b.is_directory) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    match sort {
        TreeSort::NameAsc | TreeSort::NameDesc => {
            let (pa, pb) = (NumberedName::parse(&a.name), NumberedName::parse(&b.name));
            if pa.base == pb.base && pa.ext == pb.ext {
                // An unnumbered name leads its numbered copies in either direction
                match (pa.number, pb.number) {
                    (None, Some(_)) => return Ordering::Less,
                    (Some(_), None) => return Ordering::Greater,
                    (Some(x), Some(y)) => {
                        return if sort.is_descending() {
                            y.cmp(&x)
                        } else {
                            x.cmp(&y)
                        };
                    }
                    (None, None) => {}
                }
            }
            directed(natural_cmp(&a.name, &b.name), sort)
        }
        TreeSort::ModifiedAsc | TreeSort::ModifiedDesc => {
            let ordering = match (a.modified(), b.modified()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => a.modified_at.cmp(&b.modified_at),
            };
            directed(ordering, sort)
        }
    }
}

fn directed(ordering: Ordering, sort: TreeSort) -> Ordering {
    if sort.is_descending() {
        ordering.reverse()
    } else {
        ordering
    }
}

struct NumberedName<'a> {
    base: &'a str,
    number: Option<u64>,
    ext: &'a str,
}

impl<'a> NumberedName<'a> {
    fn parse(name: &'a str) -> Self {
        match NUMBERED_NAME.captures(name) {
            Some(caps) => Self {
                base: caps.get(1).map_or(name, |m| m.as_str()),
                number: caps.get(2).and_then(|m| m.as_str().trim().parse().ok()),
                ext: caps.get(3).map_or("", |m| m.as_str()),
            },
            None => Self {
                base: name,
                number: None,
                ext: "",
            },
        }
    }
}

/// Case-insensitive comparison that orders digit runs by numeric value,
/// so `note 2` sorts before `note 10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut ai, mut bi) = (a.chars().peekable(), b.chars().peekable());
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let da = take_digits(&mut ai);
                let db = take_digits(&mut bi);
                let (ta, tb) = (da.trim_start_matches('0'), db.trim_start_matches('0'));
                let ordering = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(ca), Some(cb)) => {
                let ordering = ca.to_lowercase().cmp(cb.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}
