use super::NotebookStore;
use crate::error::{NotemarkError, Result};
use crate::model::NotebookEntry;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    entries: HashMap<Uuid, NotebookEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NotebookStore for InMemoryStore {
    fn save_entry(&mut self, entry: &NotebookEntry) -> Result<()> {
        self.entries.insert(entry.metadata.id, entry.clone());
        Ok(())
    }

    fn get_entry(&self, id: &Uuid) -> Result<NotebookEntry> {
        self.entries
            .get(id)
            .cloned()
            .ok_or(NotemarkError::EntryNotFound(*id))
    }

    fn list_entries(&self) -> Result<Vec<NotebookEntry>> {
        Ok(self.entries.values().cloned().collect())
    }

    fn delete_entry(&mut self, id: &Uuid) -> Result<()> {
        if self.entries.remove(id).is_none() {
            return Err(NotemarkError::EntryNotFound(*id));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        created: usize,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                created: 0,
            }
        }

        /// Adds an entry created one minute after the previous fixture entry,
        /// so listing order is deterministic.
        pub fn with_entry(mut self, title: &str, content: &str, grouping: &str) -> Self {
            let mut entry = NotebookEntry::new(
                title.to_string(),
                content.to_string(),
                grouping.to_string(),
            );
            let at = Utc::now() - Duration::hours(1) + Duration::minutes(self.created as i64);
            entry.metadata.created_at = at;
            entry.metadata.updated_at = at;
            self.created += 1;
            self.store.save_entry(&entry).unwrap();
            self
        }

        pub fn with_entries(mut self, count: usize, grouping: &str) -> Self {
            for i in 0..count {
                let title = format!("Notebook {}", i + 1);
                let content = format!("Notes for lesson {}", i + 1);
                self = self.with_entry(&title, &content, grouping);
            }
            self
        }
    }
}
