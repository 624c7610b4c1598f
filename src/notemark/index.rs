//! # Display Indexes
//!
//! Entries are identified by UUID in the store, but people refer to them by a
//! short number. Listing sorts entries newest-first and numbers them `1..n`;
//! that number is only stable until the next entry is created.
//!
//! A selector is either an index (`3`), a range (`2-4`), or free text matched
//! against titles.

use crate::model::NotebookEntry;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct DisplayEntry {
    pub entry: NotebookEntry,
    pub index: usize,
}

/// How a user picked an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySelector {
    Index(usize),
    Title(String),
}

impl std::fmt::Display for EntrySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntrySelector::Index(idx) => write!(f, "{}", idx),
            EntrySelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

/// Numbers entries newest-first. Ties on `created_at` fall back to title so
/// the order does not depend on store iteration order.
pub fn index_entries(mut entries: Vec<NotebookEntry>) -> Vec<DisplayEntry> {
    entries.sort_by(|a, b| {
        b.metadata
            .created_at
            .cmp(&a.metadata.created_at)
            .then_with(|| a.metadata.title.cmp(&b.metadata.title))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| DisplayEntry { entry, index: i + 1 })
        .collect()
}

/// Parses `"3"` or `"2-4"` into indexes.
pub fn parse_index_or_range(s: &str) -> Result<Vec<usize>, String> {
    if let Some((start, end)) = s.split_once('-') {
        let start = parse_index(start)?;
        let end = parse_index(end)?;
        if start > end {
            return Err(format!(
                "Invalid range: start ({}) must be <= end ({})",
                start, end
            ));
        }
        return Ok((start..=end).collect());
    }
    parse_index(s).map(|idx| vec![idx])
}

fn parse_index(s: &str) -> Result<usize, String> {
    match usize::from_str(s.trim()) {
        Ok(0) => Err("Indexes start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid index format: {}", s)),
    }
}

/// Every input parses as an index or range → index selectors. Otherwise the
/// whole input, joined with spaces, is one title search.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<EntrySelector> {
    let all_indexes: Result<Vec<Vec<usize>>, _> = inputs
        .iter()
        .map(|s| parse_index_or_range(s.as_ref()))
        .collect();

    if let Ok(indexes) = all_indexes {
        let mut selectors = Vec::new();
        for idx in indexes.into_iter().flatten() {
            let selector = EntrySelector::Index(idx);
            if !selectors.contains(&selector) {
                selectors.push(selector);
            }
        }
        return selectors;
    }

    let term = inputs
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");
    vec![EntrySelector::Title(term)]
}
