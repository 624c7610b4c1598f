//! Attaching documents to entries. Document ids are opaque strings; nothing
//! here checks that they point anywhere.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotemarkError, Result};
use crate::index::EntrySelector;
use crate::store::NotebookStore;

use super::helpers::resolve_selectors;

pub fn attach<S: NotebookStore>(
    store: &mut S,
    selectors: &[EntrySelector],
    document_id: &str,
) -> Result<CmdResult> {
    let document_id = checked_id(document_id)?;
    let mut result = CmdResult::default();

    for de in resolve_selectors(store, selectors)? {
        let mut entry = de.entry;
        if entry.metadata.attachments.insert(document_id.to_string()) {
            entry.touch();
            store.save_entry(&entry)?;
            result.add_message(CmdMessage::success(format!(
                "Attached {} to ({}): {}",
                document_id,
                de.index,
                entry.title()
            )));
        } else {
            result.add_message(CmdMessage::info(format!(
                "{} already attached to ({}): {}",
                document_id,
                de.index,
                entry.title()
            )));
        }
        result.affected_entries.push(entry);
    }

    Ok(result)
}

pub fn detach<S: NotebookStore>(
    store: &mut S,
    selectors: &[EntrySelector],
    document_id: &str,
) -> Result<CmdResult> {
    let document_id = checked_id(document_id)?;
    let mut result = CmdResult::default();

    for de in resolve_selectors(store, selectors)? {
        let mut entry = de.entry;
        if entry.metadata.attachments.remove(document_id) {
            entry.touch();
            store.save_entry(&entry)?;
            result.add_message(CmdMessage::success(format!(
                "Detached {} from ({}): {}",
                document_id,
                de.index,
                entry.title()
            )));
        } else {
            result.add_message(CmdMessage::warning(format!(
                "{} is not attached to ({}): {}",
                document_id,
                de.index,
                entry.title()
            )));
        }
        result.affected_entries.push(entry);
    }

    Ok(result)
}

fn checked_id(document_id: &str) -> Result<&str> {
    let trimmed = document_id.trim();
    if trimmed.is_empty() {
        return Err(NotemarkError::Api("Document id cannot be empty".into()));
    }
    Ok(trimmed)
}
