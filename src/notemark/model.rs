use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub const DEFAULT_GROUPING: &str = "General";

/// Everything about an entry except its body. Kept separate so listings can be
/// built from `data.json` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub id: Uuid,
    pub title: String,
    /// Class or course label the entry is filed under.
    pub grouping: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Opaque ids of attached documents; resolving them is the host's job.
    #[serde(default)]
    pub attachments: BTreeSet<String>,
}

impl EntryMetadata {
    pub fn new(title: String, grouping: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            grouping,
            created_at: now,
            updated_at: now,
            attachments: BTreeSet::new(),
        }
    }
}

/// A notebook entry. `content` is canonical markup text and is treated as an
/// opaque string everywhere outside [`crate::markup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookEntry {
    pub metadata: EntryMetadata,
    pub content: String,
}

impl NotebookEntry {
    pub fn new(title: String, content: String, grouping: String) -> Self {
        Self {
            metadata: EntryMetadata::new(title, grouping),
            content,
        }
    }

    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn grouping(&self) -> &str {
        &self.metadata.grouping
    }

    pub fn touch(&mut self) {
        self.metadata.updated_at = Utc::now();
    }
}

/// Normalizes a grouping label; blank labels fall back to `default`.
pub fn normalize_grouping(grouping: Option<&str>, default: &str) -> String {
    match grouping.map(str::trim) {
        Some(g) if !g.is_empty() => g.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_matching_timestamps() {
        let entry = NotebookEntry::new("Week 3".into(), "".into(), "Piano".into());
        assert_eq!(entry.metadata.created_at, entry.metadata.updated_at);
        assert!(entry.metadata.attachments.is_empty());
    }

    #[test]
    fn touch_moves_updated_at_forward() {
        let mut entry = NotebookEntry::new("t".into(), "".into(), "g".into());
        let before = entry.metadata.updated_at;
        entry.touch();
        assert!(entry.metadata.updated_at >= before);
        assert_eq!(entry.metadata.created_at, before);
    }

    #[test]
    fn blank_grouping_uses_default() {
        assert_eq!(normalize_grouping(Some("  "), DEFAULT_GROUPING), "General");
        assert_eq!(normalize_grouping(None, "Theory"), "Theory");
        assert_eq!(normalize_grouping(Some(" Theory "), "x"), "Theory");
    }

    #[test]
    fn metadata_without_attachments_deserializes() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "title": "Old",
            "grouping": "General",
            "created_at": "2024-11-10T00:00:00Z",
            "updated_at": "2024-11-10T00:00:00Z"
        }"#;
        let meta: EntryMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.attachments.is_empty());
        assert_eq!(meta.title, "Old");
    }
}
