//! # API Facade
//!
//! Single entry point for every UI client. The facade normalizes user input
//! (index strings → selectors, blank groupings → the configured default) and
//! dispatches to `commands/*.rs`. It holds no business logic and does no I/O
//! beyond what the store does.
//!
//! `NotemarkApi<S: NotebookStore>` is generic over storage: `FileStore` in the
//! binary, `InMemoryStore` in tests.

use crate::commands;
use crate::config::NotemarkConfig;
use crate::error::Result;
use crate::index::{parse_selectors, EntrySelector};
use crate::markup::{self, Selection, StyleKind};
use crate::model::normalize_grouping;
use crate::session::EditorSession;
use crate::store::NotebookStore;

pub struct NotemarkApi<S: NotebookStore> {
    store: S,
    paths: commands::NotemarkPaths,
    config: NotemarkConfig,
}

impl<S: NotebookStore> NotemarkApi<S> {
    pub fn new(store: S, paths: commands::NotemarkPaths, config: NotemarkConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn create_entry(
        &mut self,
        title: String,
        content: String,
        grouping: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let grouping = normalize_grouping(grouping, &self.config.default_grouping);
        commands::create::run(&mut self.store, title, content, grouping)
    }

    pub fn list_entries(&self, grouping: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, grouping)
    }

    pub fn view_entries<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, &parse_selectors(inputs))
    }

    pub fn update_entries<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        changes: &commands::EntryChanges,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, &parse_selectors(inputs), changes)
    }

    pub fn delete_entries<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, &parse_selectors(inputs))
    }

    pub fn attach_document<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        document_id: &str,
    ) -> Result<commands::CmdResult> {
        commands::attach::attach(&mut self.store, &parse_selectors(inputs), document_id)
    }

    pub fn detach_document<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        document_id: &str,
    ) -> Result<commands::CmdResult> {
        commands::attach::detach(&mut self.store, &parse_selectors(inputs), document_id)
    }

    pub fn format_entry<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        selection: Selection,
        kind: StyleKind,
    ) -> Result<commands::CmdResult> {
        let selector = single_selector(inputs);
        commands::format::run(&mut self.store, &selector, selection, kind)
    }

    /// Opens an editor session on one entry.
    pub fn open_session<I: AsRef<str>>(&self, inputs: &[I]) -> Result<EditorSession> {
        let selector = single_selector(inputs);
        let de = commands::helpers::resolve_one(&self.store, &selector)?;
        Ok(EditorSession::open(&de.entry))
    }

    /// Saves a session through this API's store.
    pub fn save_session(&mut self, session: &mut EditorSession) -> Result<commands::CmdResult> {
        let entry = session.save_to(&mut self.store)?;
        let mut result = commands::CmdResult::default();
        result.add_message(commands::CmdMessage::success(format!(
            "Notebook saved: {}",
            entry.title()
        )));
        result.affected_entries.push(entry);
        Ok(result)
    }

    pub fn render(&self, text: &str) -> String {
        markup::render(text)
    }

    pub fn parse(&self, display_markup: &str) -> String {
        markup::parse(display_markup)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::NotemarkPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Several index arguments still name one entry only if they collapse to a
/// single selector; anything else is treated as a title search.
fn single_selector<I: AsRef<str>>(inputs: &[I]) -> EntrySelector {
    let mut selectors = parse_selectors(inputs);
    if selectors.len() == 1 {
        return selectors.remove(0);
    }
    let term = inputs
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");
    EntrySelector::Title(term)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, EntryChanges, MessageLevel, NotemarkPaths};
