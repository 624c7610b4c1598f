//! # Storage Layer
//!
//! [`NotebookStore`] is the persistence seam. Business rules (timestamps,
//! title checks, ordering) live in `commands/`; a store only moves entries in
//! and out.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: metadata map in `data.json`, one content file per entry
//!   (`entry-{uuid}{ext}`), so listing never reads bodies.
//! - [`memory::InMemoryStore`]: no persistence, used by tests.
//!
//! ```text
//! <data dir>/
//! ├── data.json               # { uuid: EntryMetadata }
//! ├── entry-{uuid}.txt        # canonical markup text
//! └── config.json
//! ```

use crate::error::Result;
use crate::model::NotebookEntry;
use uuid::Uuid;

pub mod fs;
pub mod memory;

pub trait NotebookStore {
    /// Insert or replace an entry.
    fn save_entry(&mut self, entry: &NotebookEntry) -> Result<()>;

    fn get_entry(&self, id: &Uuid) -> Result<NotebookEntry>;

    /// All entries, in no particular order.
    fn list_entries(&self) -> Result<Vec<NotebookEntry>>;

    fn delete_entry(&mut self, id: &Uuid) -> Result<()>;
}
