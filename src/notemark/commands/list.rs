use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::NotebookStore;

use super::helpers::indexed_entries;

/// Lists entries newest-first. With `grouping`, only entries filed under that
/// label (case-insensitive) are returned; indexes stay those of the full list.
pub fn run<S: NotebookStore>(store: &S, grouping: Option<&str>) -> Result<CmdResult> {
    let entries = indexed_entries(store)?;
    let listed = match grouping {
        Some(group) => entries
            .into_iter()
            .filter(|de| de.entry.grouping().eq_ignore_ascii_case(group.trim()))
            .collect(),
        None => entries,
    };

    Ok(CmdResult::default().with_listed_entries(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_newest_first() {
        let fixture = StoreFixture::new().with_entries(3, "Piano");
        let result = run(&fixture.store, None).unwrap();
        let titles: Vec<_> = result
            .listed_entries
            .iter()
            .map(|de| de.entry.title().to_string())
            .collect();
        assert_eq!(titles, ["Notebook 3", "Notebook 2", "Notebook 1"]);
    }

    #[test]
    fn filters_by_grouping_keeping_indexes() {
        let fixture = StoreFixture::new()
            .with_entry("Scales", "", "Piano Basics 101")
            .with_entry("Chords", "", "Music Theory");

        let result = run(&fixture.store, Some("piano basics 101")).unwrap();
        assert_eq!(result.listed_entries.len(), 1);
        assert_eq!(result.listed_entries[0].entry.title(), "Scales");
        assert_eq!(result.listed_entries[0].index, 2);
    }
}
