use super::NotebookStore;
use crate::error::{NotemarkError, Result};
use crate::model::{EntryMetadata, NotebookEntry};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DATA_FILENAME: &str = "data.json";

pub struct FileStore {
    root: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: ".txt".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn entry_filename(&self, id: &Uuid) -> String {
        format!("entry-{}{}", id, self.file_ext)
    }

    /// Content file for `id`. Entries written before an extension change keep
    /// their old file, so fall back to any `entry-{id}.*`.
    fn find_entry_file(&self, id: &Uuid) -> Result<Option<PathBuf>> {
        let path = self.root.join(self.entry_filename(id));
        if path.exists() {
            return Ok(Some(path));
        }

        if !self.root.exists() {
            return Ok(None);
        }
        let prefix = format!("entry-{}.", id);
        for dir_entry in fs::read_dir(&self.root)? {
            let path = dir_entry?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix));
            if matches {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load_metadata(&self) -> Result<HashMap<Uuid, EntryMetadata>> {
        let data_file = self.root.join(DATA_FILENAME);
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_metadata(&self, meta: &HashMap<Uuid, EntryMetadata>) -> Result<()> {
        let content = serde_json::to_string_pretty(meta)?;
        fs::write(self.root.join(DATA_FILENAME), content)?;
        Ok(())
    }

    fn read_content(&self, id: &Uuid) -> Result<String> {
        match self.find_entry_file(id)? {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => {
                tracing::warn!(%id, "content file missing, treating entry as empty");
                Ok(String::new())
            }
        }
    }
}

impl NotebookStore for FileStore {
    fn save_entry(&mut self, entry: &NotebookEntry) -> Result<()> {
        self.ensure_root()?;

        let mut meta_map = self.load_metadata()?;
        meta_map.insert(entry.metadata.id, entry.metadata.clone());
        self.save_metadata(&meta_map)?;

        let path = self.root.join(self.entry_filename(&entry.metadata.id));
        fs::write(&path, &entry.content)?;
        tracing::debug!(id = %entry.metadata.id, path = %path.display(), "saved entry");

        Ok(())
    }

    fn get_entry(&self, id: &Uuid) -> Result<NotebookEntry> {
        let meta_map = self.load_metadata()?;
        let metadata = meta_map
            .get(id)
            .ok_or(NotemarkError::EntryNotFound(*id))?
            .clone();
        let content = self.read_content(id)?;
        Ok(NotebookEntry { metadata, content })
    }

    fn list_entries(&self) -> Result<Vec<NotebookEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let meta_map = self.load_metadata()?;
        let mut entries = Vec::with_capacity(meta_map.len());
        for (id, metadata) in meta_map {
            let content = self.read_content(&id)?;
            entries.push(NotebookEntry { metadata, content });
        }
        Ok(entries)
    }

    fn delete_entry(&mut self, id: &Uuid) -> Result<()> {
        let mut meta_map = self.load_metadata()?;
        if meta_map.remove(id).is_none() {
            return Err(NotemarkError::EntryNotFound(*id));
        }
        self.save_metadata(&meta_map)?;

        if let Some(path) = self.find_entry_file(id)? {
            fs::remove_file(path)?;
        }
        tracing::debug!(%id, "deleted entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("notebooks"));
        (dir, store)
    }

    #[test]
    fn empty_store_lists_nothing() {
        let (_dir, store) = store();
        assert!(store.list_entries().unwrap().is_empty());
    }

    #[test]
    fn saves_and_reads_back() {
        let (_dir, mut store) = store();
        let entry = NotebookEntry::new("Scales".into(), "**C major**".into(), "Piano".into());
        store.save_entry(&entry).unwrap();

        let loaded = store.get_entry(&entry.id()).unwrap();
        assert_eq!(loaded, entry);
        assert!(store
            .root()
            .join(format!("entry-{}.txt", entry.id()))
            .exists());
    }

    #[test]
    fn save_replaces_existing_entry() {
        let (_dir, mut store) = store();
        let mut entry = NotebookEntry::new("A".into(), "old".into(), "G".into());
        store.save_entry(&entry).unwrap();
        entry.content = "new".into();
        store.save_entry(&entry).unwrap();

        let all = store.list_entries().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "new");
    }

    #[test]
    fn delete_removes_metadata_and_file() {
        let (_dir, mut store) = store();
        let entry = NotebookEntry::new("A".into(), "x".into(), "G".into());
        store.save_entry(&entry).unwrap();
        store.delete_entry(&entry.id()).unwrap();

        assert!(matches!(
            store.get_entry(&entry.id()),
            Err(NotemarkError::EntryNotFound(_))
        ));
        assert!(!store
            .root()
            .join(format!("entry-{}.txt", entry.id()))
            .exists());
    }

    #[test]
    fn delete_unknown_entry_fails() {
        let (_dir, mut store) = store();
        assert!(matches!(
            store.delete_entry(&Uuid::new_v4()),
            Err(NotemarkError::EntryNotFound(_))
        ));
    }

    #[test]
    fn finds_content_written_with_old_extension() {
        let (dir, mut store) = store();
        let entry = NotebookEntry::new("A".into(), "body".into(), "G".into());
        store.save_entry(&entry).unwrap();

        let md_store = FileStore::new(dir.path().join("notebooks")).with_file_ext("md");
        assert_eq!(md_store.file_ext(), ".md");
        assert_eq!(md_store.get_entry(&entry.id()).unwrap().content, "body");
    }

    #[test]
    fn missing_content_file_reads_as_empty() {
        let (_dir, mut store) = store();
        let entry = NotebookEntry::new("A".into(), "body".into(), "G".into());
        store.save_entry(&entry).unwrap();
        fs::remove_file(store.root().join(format!("entry-{}.txt", entry.id()))).unwrap();

        assert_eq!(store.get_entry(&entry.id()).unwrap().content, "");
    }
}
