//! Canonical text → HTML display form.
//!
//! The steps run in a fixed order; each one only sees the output of the
//! previous step:
//!
//! 1. balanced `<u>`/`</u>` pairs are swapped for sentinel characters
//! 2. `& < > " '` are escaped
//! 3. `**` runs become `<strong>`
//! 4. `~~` runs become `<s>`
//! 5. `*` runs become `<em>`
//! 6. sentinels become `<u>`/`</u>`
//! 7. `\n` becomes `<br>`
//!
//! Bold has to run before italic: `**` is two italic markers, and pairing
//! single stars first would split every bold run. Anything that does not pair
//! up is left as escaped literal text.

use super::{StyleKind, BOLD_MARKER, ITALIC_MARKER, STRIKE_MARKER, UNDERLINE_CLOSE, UNDERLINE_OPEN};

const OPEN_SENTINEL: char = '\u{E000}';
const CLOSE_SENTINEL: char = '\u{E001}';

/// Renders canonical text to HTML. Never fails.
pub fn render(text: &str) -> String {
    let protected = protect_underline(text);
    let escaped = escape_html(&protected);
    let bolded = transform_wrap(&escaped, BOLD_MARKER, StyleKind::Bold.html_tag());
    let struck = transform_wrap(&bolded, STRIKE_MARKER, StyleKind::Strike.html_tag());
    let styled = transform_wrap(&struck, ITALIC_MARKER, StyleKind::Italic.html_tag());
    let restored = styled
        .replace(OPEN_SENTINEL, "<u>")
        .replace(CLOSE_SENTINEL, "</u>");
    restored.replace('\n', "<br>")
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replaces balanced underline tags with sentinels. Unmatched tags stay as text
/// and get escaped later. Sentinel characters already in the input are dropped.
fn protect_underline(text: &str) -> String {
    let text: String = text
        .chars()
        .filter(|c| *c != OPEN_SENTINEL && *c != CLOSE_SENTINEL)
        .collect();

    // Byte positions of every open/close tag, then pair them with a stack.
    let mut tags: Vec<(usize, bool)> = Vec::new();
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if rest.starts_with(UNDERLINE_OPEN) {
            tags.push((i, true));
            i += UNDERLINE_OPEN.len();
        } else if rest.starts_with(UNDERLINE_CLOSE) {
            tags.push((i, false));
            i += UNDERLINE_CLOSE.len();
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    let mut paired = vec![false; tags.len()];
    let mut stack = Vec::new();
    for (idx, (_, is_open)) in tags.iter().enumerate() {
        if *is_open {
            stack.push(idx);
        } else if let Some(open_idx) = stack.pop() {
            paired[open_idx] = true;
            paired[idx] = true;
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for ((pos, is_open), keep) in tags.into_iter().zip(paired) {
        if !keep {
            continue;
        }
        out.push_str(&text[cursor..pos]);
        if is_open {
            out.push(OPEN_SENTINEL);
            cursor = pos + UNDERLINE_OPEN.len();
        } else {
            out.push(CLOSE_SENTINEL);
            cursor = pos + UNDERLINE_CLOSE.len();
        }
    }
    out.push_str(&text[cursor..]);
    out
}

/// Pairs `marker` occurrences left to right and wraps each pair's content in
/// `<tag>`. The first following occurrence closes a run; empty runs are allowed.
/// A run whose content would cut through an earlier emitted element is refused
/// and its opening marker stays literal.
fn transform_wrap(input: &str, marker: &str, tag: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find(marker) {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + marker.len()..];

        match after_open.find(marker) {
            Some(close) if is_balanced(&after_open[..close]) => {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                out.push_str(&after_open[..close]);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                rest = &after_open[close + marker.len()..];
            }
            _ => {
                out.push_str(marker);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Every element (and underline sentinel) opened in `s` is closed in `s`, and
/// nothing closes that was not opened.
fn is_balanced(s: &str) -> bool {
    let mut depth: usize = 0;
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            OPEN_SENTINEL => depth += 1,
            CLOSE_SENTINEL => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            // After escaping, a raw '<' can only start a tag this renderer emitted.
            '<' => {
                let closing = s[i + 1..].starts_with('/');
                if closing {
                    match depth.checked_sub(1) {
                        Some(d) => depth = d,
                        None => return false,
                    }
                } else {
                    depth += 1;
                }
                for (_, c) in chars.by_ref() {
                    if c == '>' {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_style() {
        assert_eq!(render("**b**"), "<strong>b</strong>");
        assert_eq!(render("*i*"), "<em>i</em>");
        assert_eq!(render("~~s~~"), "<s>s</s>");
        assert_eq!(render("<u>u</u>"), "<u>u</u>");
    }

    #[test]
    fn bold_runs_before_italic() {
        assert_eq!(
            render("**a*b*c**"),
            "<strong>a<em>b</em>c</strong>"
        );
    }

    #[test]
    fn italic_can_wrap_bold() {
        assert_eq!(
            render("*x **y** z*"),
            "<em>x <strong>y</strong> z</em>"
        );
    }

    #[test]
    fn escapes_html_significant_characters() {
        let out = render("<script>alert('x') & \"y\"</script>");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert_eq!(
            out,
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(render("a ** b"), "a <em></em> b");
        assert_eq!(render("2 * 3"), "2 * 3");
        assert_eq!(render("~~open"), "~~open");
    }

    #[test]
    fn unbalanced_underline_is_escaped() {
        assert_eq!(render("<u>open"), "&lt;u&gt;open");
        assert_eq!(render("close</u>"), "close&lt;/u&gt;");
        assert_eq!(render("<u>a</u></u>"), "<u>a</u>&lt;/u&gt;");
    }

    #[test]
    fn nested_underline_pairs_match() {
        assert_eq!(render("<u><u>x</u></u>"), "<u><u>x</u></u>");
    }

    #[test]
    fn runs_do_not_cross_element_boundaries() {
        // The first `**` pair takes "*a"; the trailing star cannot close into it.
        assert_eq!(render("***a***"), "<strong>*a</strong>*");
        // Bold refuses to straddle the underline; its leftover stars then pair
        // up as empty italic runs on each side.
        assert_eq!(
            render("**a<u>b**c</u>"),
            "<em></em>a<u>b<em></em>c</u>"
        );
    }

    #[test]
    fn empty_pair_from_caret_insert() {
        assert_eq!(render("****"), "<strong></strong>");
        assert_eq!(render("<u></u>"), "<u></u>");
    }

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(render("one\n**two**"), "one<br><strong>two</strong>");
    }

    #[test]
    fn stray_sentinels_are_dropped() {
        assert_eq!(render("a\u{E000}b\u{E001}"), "ab");
    }

    #[test]
    fn non_ascii_text_passes_through() {
        assert_eq!(render("**café** ünd"), "<strong>café</strong> ünd");
    }
}
