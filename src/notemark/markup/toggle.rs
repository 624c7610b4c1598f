//! Selection-aware style toggling.
//!
//! A toggle either wraps the selection in a style's markers or removes markers
//! that already style it. For wrap markers the checks run in a fixed order:
//!
//! 1. the selection itself starts and ends with the marker → strip them
//! 2. the marker sits immediately outside both ends → strip those
//! 3. otherwise → wrap
//!
//! so the same action undoes formatting whether the user selected the markers
//! or only the text between them. Toggling twice, feeding back the returned
//! selection, restores the original text.

use super::{Marker, Selection, StyleKind, ToggleState};

/// Result of a single toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub text: String,
    pub selection: Selection,
    pub state: ToggleState,
}

impl Toggled {
    /// Toolbar flag for `kind` after the toggle.
    pub fn active(&self, kind: StyleKind) -> bool {
        self.state.get(kind)
    }
}

/// Toggles `kind` over `selection` in `text`.
///
/// `state` is the toolbar state before the action. A caret toggle flips the
/// flag for `kind`; a range toggle sets it to whether the range is now styled.
pub fn toggle(text: &str, selection: Selection, kind: StyleKind, state: ToggleState) -> Toggled {
    let selection = selection.clamp_to(text);
    let caret = selection.is_caret();
    let (text, selection, active) = match (kind.marker(), caret) {
        (Marker::Wrap(marker), true) => toggle_wrap_caret(text, selection.start, marker),
        (Marker::Wrap(marker), false) => toggle_wrap_range(text, selection, marker),
        (Marker::Tag { open, close }, true) => toggle_tag_caret(text, selection.start, open, close),
        (Marker::Tag { open, close }, false) => toggle_tag_range(text, selection, open, close),
    };

    let active = if caret { !state.get(kind) } else { active };
    tracing::trace!(%kind, %selection, active, "toggled style");

    Toggled {
        text,
        selection,
        state: state.with(kind, active),
    }
}

fn toggle_wrap_caret(text: &str, caret: usize, marker: &str) -> (String, Selection, bool) {
    let m = marker.len();
    if ends_with_at(text, caret, marker) && starts_with_at(text, caret, marker) {
        // Caret sits inside an empty pair: drop it.
        let out = splice(text, caret - m, caret + m, "");
        return (out, Selection::caret(caret - m), false);
    }

    let pair = format!("{marker}{marker}");
    let out = splice(text, caret, caret, &pair);
    (out, Selection::caret(caret + m), true)
}

fn toggle_wrap_range(text: &str, sel: Selection, marker: &str) -> (String, Selection, bool) {
    let m = marker.len();
    let selected = &text[sel.start..sel.end];

    if selected.len() >= 2 * m && selected.starts_with(marker) && selected.ends_with(marker) {
        let inner = &selected[m..selected.len() - m];
        let out = splice(text, sel.start, sel.end, inner);
        return (out, Selection::new(sel.start, sel.start + inner.len()), false);
    }

    if ends_with_at(text, sel.start, marker) && starts_with_at(text, sel.end, marker) {
        let mut out = String::with_capacity(text.len() - 2 * m);
        out.push_str(&text[..sel.start - m]);
        out.push_str(selected);
        out.push_str(&text[sel.end + m..]);
        return (out, Selection::new(sel.start - m, sel.end - m), false);
    }

    let mut out = String::with_capacity(text.len() + 2 * m);
    out.push_str(&text[..sel.start]);
    out.push_str(marker);
    out.push_str(selected);
    out.push_str(marker);
    out.push_str(&text[sel.end..]);
    (out, Selection::new(sel.start, sel.end + 2 * m), true)
}

fn toggle_tag_caret(
    text: &str,
    caret: usize,
    open: &str,
    close: &str,
) -> (String, Selection, bool) {
    if ends_with_at(text, caret, open) && starts_with_at(text, caret, close) {
        let start = caret - open.len();
        let out = splice(text, start, caret + close.len(), "");
        return (out, Selection::caret(start), false);
    }

    let pair = format!("{open}{close}");
    let out = splice(text, caret, caret, &pair);
    (out, Selection::caret(caret + open.len()), true)
}

fn toggle_tag_range(
    text: &str,
    sel: Selection,
    open: &str,
    close: &str,
) -> (String, Selection, bool) {
    let selected = &text[sel.start..sel.end];

    if selected.len() >= open.len() + close.len()
        && selected.starts_with(open)
        && selected.ends_with(close)
    {
        let inner = &selected[open.len()..selected.len() - close.len()];
        let out = splice(text, sel.start, sel.end, inner);
        return (out, Selection::new(sel.start, sel.start + inner.len()), false);
    }

    let wrapped = format!("{open}{selected}{close}");
    let out = splice(text, sel.start, sel.end, &wrapped);
    (out, Selection::new(sel.start, sel.start + wrapped.len()), true)
}

/// `text[..at]` ends with `marker`.
fn ends_with_at(text: &str, at: usize, marker: &str) -> bool {
    at >= marker.len() && text.as_bytes()[at - marker.len()..at] == *marker.as_bytes()
}

/// `text[at..]` starts with `marker`.
fn starts_with_at(text: &str, at: usize, marker: &str) -> bool {
    text.as_bytes()
        .get(at..at + marker.len())
        .is_some_and(|window| window == marker.as_bytes())
}

fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - (end - start) + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, start: usize, end: usize, kind: StyleKind) -> Toggled {
        toggle(text, Selection::new(start, end), kind, ToggleState::default())
    }

    #[test]
    fn caret_insert_bold_pair() {
        let out = run("", 0, 0, StyleKind::Bold);
        assert_eq!(out.text, "****");
        assert_eq!(out.selection, Selection::caret(2));
        assert!(out.active(StyleKind::Bold));
    }

    #[test]
    fn caret_inside_empty_pair_removes_it() {
        let bold_on = ToggleState::default().with(StyleKind::Bold, true);
        let out = toggle("ab****cd", Selection::caret(4), StyleKind::Bold, bold_on);
        assert_eq!(out.text, "abcd");
        assert_eq!(out.selection, Selection::caret(2));
        assert!(!out.active(StyleKind::Bold));
    }

    #[test]
    fn caret_toggle_flips_toolbar_flag() {
        let bold_on = ToggleState::default().with(StyleKind::Bold, true);
        let out = toggle("ab", Selection::caret(1), StyleKind::Bold, bold_on);
        assert_eq!(out.text, "a****b");
        assert!(!out.active(StyleKind::Bold));

        let underline_on = ToggleState::default().with(StyleKind::Underline, true);
        let out = toggle("ab", Selection::caret(1), StyleKind::Underline, underline_on);
        assert_eq!(out.text, "a<u></u>b");
        assert!(!out.active(StyleKind::Underline));
    }

    #[test]
    fn range_toggle_reflects_result_not_prior_flag() {
        let bold_on = ToggleState::default().with(StyleKind::Bold, true);
        let out = toggle("hello", Selection::new(0, 5), StyleKind::Bold, bold_on);
        assert_eq!(out.text, "**hello**");
        assert!(out.active(StyleKind::Bold));
    }

    #[test]
    fn caret_italic_inserts_single_markers() {
        let out = run("ab", 1, 1, StyleKind::Italic);
        assert_eq!(out.text, "a**b");
        assert_eq!(out.selection, Selection::caret(2));
    }

    #[test]
    fn caret_underline_inserts_tag_pair() {
        let out = run("ab", 1, 1, StyleKind::Underline);
        assert_eq!(out.text, "a<u></u>b");
        assert_eq!(out.selection, Selection::caret(4));
        assert!(out.active(StyleKind::Underline));
    }

    #[test]
    fn caret_underline_inside_empty_pair_removes_it() {
        let underline_on = ToggleState::default().with(StyleKind::Underline, true);
        let out = toggle("a<u></u>b", Selection::caret(4), StyleKind::Underline, underline_on);
        assert_eq!(out.text, "ab");
        assert_eq!(out.selection, Selection::caret(1));
        assert!(!out.active(StyleKind::Underline));
    }

    #[test]
    fn selection_wrap_grows_selection() {
        let out = run("hello world", 0, 5, StyleKind::Bold);
        assert_eq!(out.text, "**hello** world");
        assert_eq!(out.selection, Selection::new(0, 9));
        assert!(out.active(StyleKind::Bold));
    }

    #[test]
    fn selection_including_markers_unwraps() {
        let out = run("**hello** world", 0, 9, StyleKind::Bold);
        assert_eq!(out.text, "hello world");
        assert_eq!(out.selection, Selection::new(0, 5));
        assert!(!out.active(StyleKind::Bold));
    }

    #[test]
    fn selection_inside_wrapped_run_unwraps() {
        let out = run("he**ll**o", 4, 6, StyleKind::Bold);
        assert_eq!(out.text, "hello");
        assert_eq!(out.selection, Selection::new(2, 4));
        assert!(!out.active(StyleKind::Bold));
    }

    #[test]
    fn strike_wraps_and_unwraps() {
        let out = run("gone soon", 0, 4, StyleKind::Strike);
        assert_eq!(out.text, "~~gone~~ soon");
        let back = toggle(&out.text, out.selection, StyleKind::Strike, out.state);
        assert_eq!(back.text, "gone soon");
    }

    #[test]
    fn underline_selection_wrap_and_unwrap() {
        let out = run("note", 0, 4, StyleKind::Underline);
        assert_eq!(out.text, "<u>note</u>");
        assert_eq!(out.selection, Selection::new(0, 11));

        let back = toggle(&out.text, out.selection, StyleKind::Underline, out.state);
        assert_eq!(back.text, "note");
        assert_eq!(back.selection, Selection::new(0, 4));
        assert!(!back.active(StyleKind::Underline));
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let out = run("abc", 1, 99, StyleKind::Italic);
        assert_eq!(out.text, "a*bc*");
        assert_eq!(out.selection, Selection::new(1, 5));
    }

    #[test]
    fn reversed_selection_is_normalized() {
        let out = run("hello", 5, 0, StyleKind::Bold);
        assert_eq!(out.text, "**hello**");
    }

    #[test]
    fn multibyte_text_keeps_boundaries() {
        let text = "café au lait";
        let out = run(text, 0, "café".len(), StyleKind::Italic);
        assert_eq!(out.text, "*café* au lait");
        let back = toggle(&out.text, out.selection, StyleKind::Italic, out.state);
        assert_eq!(back.text, text);
    }

    #[test]
    fn previous_state_of_other_kinds_is_kept() {
        let before = ToggleState::default().with(StyleKind::Italic, true);
        let out = toggle("x", Selection::new(0, 1), StyleKind::Bold, before);
        assert!(out.state.italic);
        assert!(out.state.bold);
    }

    #[test]
    fn italic_inside_bold_run_eats_one_star() {
        // Bold's marker is two italic markers; italic toggles see the inner star.
        let once = run("he**ll**o", 4, 6, StyleKind::Italic);
        assert_eq!(once.text, "he*ll*o");
        assert_eq!(once.selection, Selection::new(3, 5));
        let twice = toggle(&once.text, once.selection, StyleKind::Italic, once.state);
        assert_eq!(twice.text, "hello");
    }

    #[test]
    fn double_toggle_restores_text() {
        let texts = [
            "",
            "hello world",
            "he~~ll~~o",
            "one\ntwo\nthree",
            "a <u>b</u> c",
            "~~old~~ new",
            "naïve résumé",
        ];

        for text in texts {
            let boundaries: Vec<usize> = (0..=text.len())
                .filter(|i| text.is_char_boundary(*i))
                .collect();
            for kind in StyleKind::ALL {
                for &start in &boundaries {
                    for &end in boundaries.iter().filter(|e| **e >= start) {
                        let sel = Selection::new(start, end);
                        let once = toggle(text, sel, kind, ToggleState::default());
                        let twice = toggle(&once.text, once.selection, kind, once.state);
                        assert_eq!(
                            twice.text, text,
                            "{kind} over {sel} of {text:?} (intermediate {:?})",
                            once.text
                        );
                        assert_eq!(twice.state.get(kind), !once.state.get(kind));
                    }
                }
            }
        }
    }
}
