use crate::commands::{CmdMessage, CmdResult, EntryChanges};
use crate::error::{NotemarkError, Result};
use crate::index::EntrySelector;
use crate::model::NotebookEntry;
use crate::store::NotebookStore;
use uuid::Uuid;

use super::helpers::resolve_selectors;

/// Persists a new body, title and grouping for an existing entry and returns
/// the stored version. This is what an editor session calls on save.
pub fn save<S: NotebookStore>(
    store: &mut S,
    id: &Uuid,
    content: &str,
    title: &str,
    grouping: &str,
) -> Result<NotebookEntry> {
    let changes = EntryChanges {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        grouping: Some(grouping.to_string()),
    };
    apply(store, id, &changes)
}

fn apply<S: NotebookStore>(
    store: &mut S,
    id: &Uuid,
    changes: &EntryChanges,
) -> Result<NotebookEntry> {
    let mut entry = store.get_entry(id)?;

    if let Some(title) = &changes.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(NotemarkError::EmptyTitle);
        }
        entry.metadata.title = title.to_string();
    }
    if let Some(content) = &changes.content {
        entry.content = content.clone();
    }
    if let Some(grouping) = &changes.grouping {
        entry.metadata.grouping = grouping.trim().to_string();
    }

    entry.touch();
    store.save_entry(&entry)?;
    tracing::debug!(%id, bytes = entry.content.len(), "saved entry");
    Ok(entry)
}

pub fn run<S: NotebookStore>(
    store: &mut S,
    selectors: &[EntrySelector],
    changes: &EntryChanges,
) -> Result<CmdResult> {
    if changes.is_empty() {
        return Ok(CmdResult::default());
    }

    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for de in resolved {
        let entry = apply(store, &de.entry.id(), changes)?;
        result.add_message(CmdMessage::success(format!(
            "Notebook updated ({}): {}",
            de.index,
            entry.title()
        )));
        result.affected_entries.push(entry);
    }

    Ok(result)
}
