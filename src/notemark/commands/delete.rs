use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::EntrySelector;
use crate::store::NotebookStore;

use super::helpers::resolve_selectors;

/// Removes entries permanently.
pub fn run<S: NotebookStore>(store: &mut S, selectors: &[EntrySelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for de in resolved {
        store.delete_entry(&de.entry.id())?;
        result.add_message(CmdMessage::success(format!(
            "Notebook deleted ({}): {}",
            de.index,
            de.entry.title()
        )));
        result.affected_entries.push(de.entry);
    }

    Ok(result)
}
