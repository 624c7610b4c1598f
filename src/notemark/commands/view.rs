use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::EntrySelector;
use crate::store::NotebookStore;

use super::helpers::resolve_selectors;

pub fn run<S: NotebookStore>(store: &S, selectors: &[EntrySelector]) -> Result<CmdResult> {
    let entries = resolve_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_entries(entries))
}
