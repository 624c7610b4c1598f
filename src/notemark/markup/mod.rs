//! # Inline Markup Engine
//!
//! Notebook content is stored as **canonical text**: a plain string where inline
//! styles are written as literal markers. Four styles exist:
//!
//! ```text
//! bold       **text**      wrap marker
//! italic     *text*        wrap marker
//! strike     ~~text~~      wrap marker
//! underline  <u>text</u>   tag marker (distinct open/close)
//! ```
//!
//! Wrap markers are placed identically on both sides of a run. Underline uses a
//! tag pair instead, so it never shares a character with italic's single `*`.
//! Newlines are plain `\n`. Markers cannot be escaped: typing `**` by hand *is*
//! formatting syntax.
//!
//! The engine has three pure operations, none of which can fail:
//!
//! - [`toggle::toggle`]: add or remove a style over a selection, returning the
//!   new text, the new selection and the derived [`ToggleState`].
//! - [`render::render`]: canonical text → HTML display form.
//! - [`parse::parse`]: HTML display form → canonical text.
//!
//! `parse(render(x)) == x` holds for any canonical text that contains no raw
//! angle brackets (other than underline tags) and no entity sequences.
//!
//! ## Offsets
//!
//! A [`Selection`] is a half-open byte range into the canonical text. Every
//! marker is ASCII, so a marker match always lands on a character boundary.
//! Offsets coming from the host are clamped, never rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod parse;
pub mod render;
pub mod toggle;

pub use parse::parse;
pub use render::render;
pub use toggle::{toggle, Toggled};

pub const BOLD_MARKER: &str = "**";
pub const ITALIC_MARKER: &str = "*";
pub const STRIKE_MARKER: &str = "~~";
pub const UNDERLINE_OPEN: &str = "<u>";
pub const UNDERLINE_CLOSE: &str = "</u>";

/// One of the four supported inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strike,
}

/// How a style is spelled in canonical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Same literal on both sides of the run.
    Wrap(&'static str),
    /// Distinct open and close literals.
    Tag {
        open: &'static str,
        close: &'static str,
    },
}

impl StyleKind {
    pub const ALL: [StyleKind; 4] = [
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Underline,
        StyleKind::Strike,
    ];

    pub fn marker(self) -> Marker {
        match self {
            StyleKind::Bold => Marker::Wrap(BOLD_MARKER),
            StyleKind::Italic => Marker::Wrap(ITALIC_MARKER),
            StyleKind::Strike => Marker::Wrap(STRIKE_MARKER),
            StyleKind::Underline => Marker::Tag {
                open: UNDERLINE_OPEN,
                close: UNDERLINE_CLOSE,
            },
        }
    }

    /// Display-form element name emitted by the renderer.
    pub fn html_tag(self) -> &'static str {
        match self {
            StyleKind::Bold => "strong",
            StyleKind::Italic => "em",
            StyleKind::Underline => "u",
            StyleKind::Strike => "s",
        }
    }

    /// Keyboard shortcut letter (used with the platform modifier key).
    pub fn from_shortcut(key: char) -> Option<StyleKind> {
        match key.to_ascii_lowercase() {
            'b' => Some(StyleKind::Bold),
            'i' => Some(StyleKind::Italic),
            'u' => Some(StyleKind::Underline),
            's' => Some(StyleKind::Strike),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underline => "underline",
            StyleKind::Strike => "strike",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StyleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bold" | "b" => Ok(StyleKind::Bold),
            "italic" | "i" => Ok(StyleKind::Italic),
            "underline" | "u" => Ok(StyleKind::Underline),
            "strike" | "strikethrough" | "s" => Ok(StyleKind::Strike),
            other => Err(format!("Unknown style: {}", other)),
        }
    }
}

/// Half-open byte range `[start, end)` into canonical text.
/// `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Orders the bounds and pulls them into `text`, snapping each one down to
    /// the nearest character boundary.
    pub fn clamp_to(self, text: &str) -> Selection {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Selection {
            start: floor_char_boundary(text, lo),
            end: floor_char_boundary(text, hi),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Which toolbar buttons read as "on".
///
/// Derived per toggle call and handed back to the caller; nothing in the engine
/// keeps it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToggleState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
}

impl ToggleState {
    pub fn get(&self, kind: StyleKind) -> bool {
        match kind {
            StyleKind::Bold => self.bold,
            StyleKind::Italic => self.italic,
            StyleKind::Underline => self.underline,
            StyleKind::Strike => self.strike,
        }
    }

    pub fn with(mut self, kind: StyleKind, active: bool) -> Self {
        match kind {
            StyleKind::Bold => self.bold = active,
            StyleKind::Italic => self.italic = active,
            StyleKind::Underline => self.underline = active,
            StyleKind::Strike => self.strike = active,
        }
        self
    }

    pub fn active_kinds(&self) -> Vec<StyleKind> {
        StyleKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_offsets_into_text() {
        let sel = Selection::new(3, 40).clamp_to("hello");
        assert_eq!(sel, Selection::new(3, 5));
    }

    #[test]
    fn clamp_orders_reversed_bounds() {
        let sel = Selection::new(4, 1).clamp_to("hello");
        assert_eq!(sel, Selection::new(1, 4));
    }

    #[test]
    fn clamp_snaps_to_char_boundary() {
        // "é" is two bytes; offset 2 sits inside it.
        let sel = Selection::new(2, 2).clamp_to("aé");
        assert_eq!(sel, Selection::caret(1));
    }

    #[test]
    fn parses_style_names() {
        assert_eq!("Bold".parse::<StyleKind>(), Ok(StyleKind::Bold));
        assert_eq!(
            "strikethrough".parse::<StyleKind>(),
            Ok(StyleKind::Strike)
        );
        assert!("heading".parse::<StyleKind>().is_err());
    }

    #[test]
    fn shortcuts_map_to_styles() {
        assert_eq!(StyleKind::from_shortcut('B'), Some(StyleKind::Bold));
        assert_eq!(StyleKind::from_shortcut('u'), Some(StyleKind::Underline));
        assert_eq!(StyleKind::from_shortcut('x'), None);
    }

    #[test]
    fn toggle_state_tracks_each_kind() {
        let state = ToggleState::default()
            .with(StyleKind::Italic, true)
            .with(StyleKind::Strike, true);
        assert!(state.get(StyleKind::Italic));
        assert!(!state.get(StyleKind::Bold));
        assert_eq!(state.active_kinds(), vec![StyleKind::Italic, StyleKind::Strike]);
    }
}
