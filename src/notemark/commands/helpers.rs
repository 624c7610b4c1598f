use crate::error::{NotemarkError, Result};
use crate::index::{index_entries, DisplayEntry, EntrySelector};
use crate::store::NotebookStore;

pub fn indexed_entries<S: NotebookStore>(store: &S) -> Result<Vec<DisplayEntry>> {
    let entries = store.list_entries()?;
    Ok(index_entries(entries))
}

/// Resolves selectors to entries, in selector order. An index must exist; a
/// title search must match at least one entry (case-insensitive substring).
pub fn resolve_selectors<S: NotebookStore>(
    store: &S,
    selectors: &[EntrySelector],
) -> Result<Vec<DisplayEntry>> {
    let indexed = indexed_entries(store)?;
    let mut resolved: Vec<DisplayEntry> = Vec::new();

    for selector in selectors {
        let matches: Vec<&DisplayEntry> = match selector {
            EntrySelector::Index(idx) => indexed.iter().filter(|de| de.index == *idx).collect(),
            EntrySelector::Title(term) => {
                let term = term.to_lowercase();
                indexed
                    .iter()
                    .filter(|de| de.entry.title().to_lowercase().contains(&term))
                    .collect()
            }
        };

        if matches.is_empty() {
            return Err(NotemarkError::NoMatch(selector.to_string()));
        }

        for de in matches {
            if !resolved.iter().any(|r| r.entry.id() == de.entry.id()) {
                resolved.push(de.clone());
            }
        }
    }

    Ok(resolved)
}

/// Like [`resolve_selectors`] but insists on exactly one entry.
pub fn resolve_one<S: NotebookStore>(store: &S, selector: &EntrySelector) -> Result<DisplayEntry> {
    let mut resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    if resolved.len() > 1 {
        return Err(NotemarkError::Api(format!(
            "{} matches {} entries; pick one by index",
            selector,
            resolved.len()
        )));
    }
    Ok(resolved.remove(0))
}
