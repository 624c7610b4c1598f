use crate::commands::{CmdMessage, CmdResult, FormatOutcome};
use crate::error::Result;
use crate::index::EntrySelector;
use crate::markup::{self, Selection, StyleKind, ToggleState};
use crate::store::NotebookStore;

use super::helpers::resolve_one;

/// Toggles `kind` over `selection` in a stored entry and saves the result.
///
/// The returned [`FormatOutcome`] carries the selection the host should apply
/// next and the toolbar state; toggle state starts fresh for every call.
pub fn run<S: NotebookStore>(
    store: &mut S,
    selector: &EntrySelector,
    selection: Selection,
    kind: StyleKind,
) -> Result<CmdResult> {
    let de = resolve_one(store, selector)?;
    let mut entry = de.entry;

    let toggled = markup::toggle(&entry.content, selection, kind, ToggleState::default());
    let applied = toggled.text.len() > entry.content.len();
    entry.content = toggled.text;
    entry.touch();
    store.save_entry(&entry)?;

    let verb = if applied {
        "Applied"
    } else {
        "Removed"
    };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} ({}): {}",
        verb,
        kind,
        de.index,
        entry.title()
    )));
    result.format = Some(FormatOutcome {
        selection: toggled.selection,
        state: toggled.state,
    });
    result.affected_entries.push(entry);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn formats_and_persists() {
        let mut fixture = StoreFixture::new().with_entry("Lesson", "hello world", "Piano");
        let result = run(
            &mut fixture.store,
            &EntrySelector::Index(1),
            Selection::new(0, 5),
            StyleKind::Bold,
        )
        .unwrap();

        let outcome = result.format.unwrap();
        assert_eq!(outcome.selection, Selection::new(0, 9));
        assert!(outcome.state.bold);
        assert_eq!(
            fixture.store.list_entries().unwrap()[0].content,
            "**hello** world"
        );
    }

    #[test]
    fn formatting_twice_restores_content() {
        let mut fixture = StoreFixture::new().with_entry("Lesson", "hello world", "Piano");
        let sel = EntrySelector::Index(1);
        let first = run(&mut fixture.store, &sel, Selection::new(6, 11), StyleKind::Underline)
            .unwrap()
            .format
            .unwrap();
        let second = run(&mut fixture.store, &sel, first.selection, StyleKind::Underline)
            .unwrap()
            .format
            .unwrap();

        assert!(!second.state.underline);
        assert_eq!(fixture.store.list_entries().unwrap()[0].content, "hello world");
    }

    #[test]
    fn caret_removal_reports_removed() {
        let mut fixture = StoreFixture::new().with_entry("Lesson", "ab****cd", "Piano");
        let result = run(
            &mut fixture.store,
            &EntrySelector::Index(1),
            Selection::caret(4),
            StyleKind::Bold,
        )
        .unwrap();

        assert_eq!(result.affected_entries[0].content, "abcd");
        assert!(result.messages[0].content.starts_with("Removed bold"));
    }
}
