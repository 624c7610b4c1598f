use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotemarkError, Result};
use crate::model::NotebookEntry;
use crate::store::NotebookStore;

/// Creates an entry. Content is stored as given; it is canonical markup.
pub fn run<S: NotebookStore>(
    store: &mut S,
    title: String,
    content: String,
    grouping: String,
) -> Result<CmdResult> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(NotemarkError::EmptyTitle);
    }

    let entry = NotebookEntry::new(title, content, grouping);
    store.save_entry(&entry)?;
    tracing::debug!(id = %entry.id(), grouping = %entry.grouping(), "created entry");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Notebook created: {}",
        entry.title()
    )));
    result.affected_entries.push(entry);
    Ok(result)
}
