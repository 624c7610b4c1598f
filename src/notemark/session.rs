//! # Editor Session
//!
//! One [`EditorSession`] per open notebook entry. It owns the live canonical
//! text and the toolbar [`ToggleState`], and turns host events into calls on
//! the markup engine:
//!
//! - a toolbar button or shortcut → [`EditorSession::toggle`]
//! - the user typed into the rendered surface → [`EditorSession::edit_display`]
//! - the user typed into the raw surface → [`EditorSession::edit_raw`]
//!
//! The host owns the actual caret and focus; the session only hands back
//! offsets.
//!
//! ## Saving
//!
//! Persistence is split in two so the host can run it off the editing path:
//!
//! ```text
//! begin_save()  ──► SaveRequest { revision, content, ... } ──► host persists
//! complete_save(&request, &result) ◄─────────────────────────────┘
//! ```
//!
//! Editing continues while a save is in flight, and a second `begin_save`
//! simply snapshots newer text. The state stays `Saving` until no request is
//! outstanding. Storage is last-writer-wins, so the saved baseline used by
//! `is_dirty` follows whichever snapshot completed last, even an older one.
//! A failed save leaves text and toggle state untouched so the user can retry;
//! failures of snapshots older than a successful one are ignored.

use crate::commands::update;
use crate::error::Result;
use crate::markup::{self, Selection, StyleKind, ToggleState};
use crate::model::NotebookEntry;
use crate::store::NotebookStore;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// What the editable surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Display form (HTML) produced by the renderer.
    #[default]
    Rendered,
    /// Canonical text, markers visible.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving {
        revision: u64,
    },
    Saved {
        revision: u64,
        at: DateTime<Utc>,
    },
    Failed {
        revision: u64,
        message: String,
    },
}

/// Snapshot handed to the host for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub revision: u64,
    pub id: Uuid,
    pub content: String,
    pub title: String,
    pub grouping: String,
}

/// What the host needs after a toggle: new surface content and where to put
/// the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleUpdate {
    pub surface: String,
    pub selection: Selection,
    pub state: ToggleState,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    id: Uuid,
    title: String,
    grouping: String,
    attachments: BTreeSet<String>,
    text: String,
    toggle_state: ToggleState,
    mode: EditMode,
    saved_text: String,
    next_revision: u64,
    save_state: SaveState,
    in_flight: BTreeSet<u64>,
    /// Newest revision confirmed by the store, and when.
    last_saved: Option<(u64, DateTime<Utc>)>,
}

impl EditorSession {
    /// Opens an entry. Toggle state always starts cleared.
    pub fn open(entry: &NotebookEntry) -> Self {
        tracing::debug!(id = %entry.id(), "opened editor session");
        Self {
            id: entry.id(),
            title: entry.title().to_string(),
            grouping: entry.grouping().to_string(),
            attachments: entry.metadata.attachments.clone(),
            text: entry.content.clone(),
            toggle_state: ToggleState::default(),
            mode: EditMode::default(),
            saved_text: entry.content.clone(),
            next_revision: 1,
            save_state: SaveState::Idle,
            in_flight: BTreeSet::new(),
            last_saved: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn grouping(&self) -> &str {
        &self.grouping
    }

    pub fn set_grouping(&mut self, grouping: impl Into<String>) {
        self.grouping = grouping.into();
    }

    /// Attached document ids, for display only.
    pub fn attachments(&self) -> impl Iterator<Item = &str> {
        self.attachments.iter().map(String::as_str)
    }

    pub fn canonical_text(&self) -> &str {
        &self.text
    }

    pub fn toggle_state(&self) -> ToggleState {
        self.toggle_state
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    /// Live text differs from what was last saved successfully.
    pub fn is_dirty(&self) -> bool {
        self.text != self.saved_text
    }

    /// Content for the editable surface in the current mode.
    pub fn surface_content(&self) -> String {
        match self.mode {
            EditMode::Rendered => markup::render(&self.text),
            EditMode::Raw => self.text.clone(),
        }
    }

    /// Applies a style toggle to the canonical text.
    pub fn toggle(&mut self, selection: Selection, kind: StyleKind) -> ToggleUpdate {
        let toggled = markup::toggle(&self.text, selection, kind, self.toggle_state);
        self.text = toggled.text;
        self.toggle_state = toggled.state;

        ToggleUpdate {
            surface: self.surface_content(),
            selection: toggled.selection,
            state: toggled.state,
        }
    }

    /// Keyboard shortcut dispatch; unknown keys are ignored.
    pub fn shortcut(&mut self, key: char, selection: Selection) -> Option<ToggleUpdate> {
        StyleKind::from_shortcut(key).map(|kind| self.toggle(selection, kind))
    }

    /// The user edited the rendered surface; re-derive canonical text.
    pub fn edit_display(&mut self, display_markup: &str) {
        self.text = markup::parse(display_markup);
    }

    /// The user edited the raw surface.
    pub fn edit_raw(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Snapshots the current state for persistence.
    pub fn begin_save(&mut self) -> SaveRequest {
        let revision = self.next_revision;
        self.next_revision += 1;
        self.in_flight.insert(revision);
        self.save_state = SaveState::Saving { revision };
        tracing::debug!(id = %self.id, revision, "save started");

        SaveRequest {
            revision,
            id: self.id,
            content: self.text.clone(),
            title: self.title.clone(),
            grouping: self.grouping.clone(),
        }
    }

    /// Records the outcome of a save started with [`begin_save`](Self::begin_save).
    pub fn complete_save(&mut self, request: &SaveRequest, outcome: &Result<NotebookEntry>) {
        let revision = request.revision;
        self.in_flight.remove(&revision);
        let pending = self.in_flight.last().copied();

        match outcome {
            Ok(entry) => {
                // The store now holds this snapshot, older or not.
                self.saved_text = request.content.clone();
                self.attachments = entry.metadata.attachments.clone();
                if self
                    .last_saved
                    .is_none_or(|(latest, _)| revision > latest)
                {
                    self.last_saved = Some((revision, entry.metadata.updated_at));
                }
                self.save_state = match pending {
                    Some(revision) => SaveState::Saving { revision },
                    None => SaveState::Saved {
                        revision,
                        at: entry.metadata.updated_at,
                    },
                };
            }
            Err(err) => {
                tracing::warn!(
                    id = %self.id,
                    revision,
                    error = %err,
                    "save failed"
                );
                self.save_state = match (pending, self.last_saved) {
                    (Some(revision), _) => SaveState::Saving { revision },
                    (None, Some((latest, at))) if revision < latest => {
                        tracing::debug!(revision, "failure superseded by a newer save");
                        SaveState::Saved {
                            revision: latest,
                            at,
                        }
                    }
                    (None, _) => SaveState::Failed {
                        revision,
                        message: err.to_string(),
                    },
                };
            }
        }
    }

    /// Saves synchronously through `store`.
    pub fn save_to<S: NotebookStore>(&mut self, store: &mut S) -> Result<NotebookEntry> {
        let request = self.begin_save();
        let outcome = update::save(
            store,
            &request.id,
            &request.content,
            &request.title,
            &request.grouping,
        );
        self.complete_save(&request, &outcome);
        outcome
    }
}
