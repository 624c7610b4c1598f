//! # Command Layer
//!
//! Business logic for each operation. Commands take a store and plain Rust
//! values and return a [`CmdResult`]; they never print.

use crate::config::NotemarkConfig;
use crate::index::DisplayEntry;
use crate::markup::{Selection, ToggleState};
use crate::model::NotebookEntry;
use std::path::PathBuf;

pub mod attach;
pub mod config;
pub mod create;
pub mod delete;
pub mod format;
pub mod helpers;
pub mod list;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct NotemarkPaths {
    pub data: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Outcome of a toggle applied to a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOutcome {
    pub selection: Selection,
    pub state: ToggleState,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<NotebookEntry>,
    pub listed_entries: Vec<DisplayEntry>,
    pub format: Option<FormatOutcome>,
    pub config: Option<NotemarkConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_entries(mut self, entries: Vec<DisplayEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_config(mut self, config: NotemarkConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Partial update of an entry; `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub grouping: Option<String>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.grouping.is_none()
    }
}
