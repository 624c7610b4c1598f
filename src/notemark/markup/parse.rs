//! HTML display form → canonical text.
//!
//! Used whenever the user typed straight into the rendered surface. Known
//! style tags (and their aliases) map back to markers, `<br>` becomes `\n`,
//! every other tag is dropped and entities are decoded. Pasted content the
//! renderer never produced loses its structure but keeps its text.

use super::{Marker, StyleKind};

/// Display-form spellings accepted for each style.
const TAG_ALIASES: &[(&str, StyleKind)] = &[
    ("strong", StyleKind::Bold),
    ("b", StyleKind::Bold),
    ("em", StyleKind::Italic),
    ("i", StyleKind::Italic),
    ("u", StyleKind::Underline),
    ("ins", StyleKind::Underline),
    ("s", StyleKind::Strike),
    ("strike", StyleKind::Strike),
    ("del", StyleKind::Strike),
];

const LINE_BREAK_TAG: &str = "br";

/// Parses display markup back into canonical text. Never fails.
pub fn parse(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let candidate = &rest[lt..];

        if let Some(comment) = candidate.strip_prefix("<!--") {
            rest = match comment.find("-->") {
                Some(end) => &comment[end + 3..],
                None => "",
            };
            continue;
        }

        let Some(gt) = candidate.find('>') else {
            // No closing bracket anywhere: not a tag.
            out.push_str(candidate);
            rest = "";
            break;
        };

        let tag = Tag::read(&candidate[1..gt]);
        match tag.name.as_str() {
            LINE_BREAK_TAG => out.push('\n'),
            name => match lookup_style(name) {
                Some(kind) => out.push_str(marker_for(kind, tag.closing)),
                None => {
                    tracing::trace!(tag = %tag.name, "dropping unsupported tag");
                }
            },
        }
        rest = &candidate[gt + 1..];
    }
    out.push_str(rest);

    decode_entities(&out)
}

fn lookup_style(name: &str) -> Option<StyleKind> {
    TAG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, kind)| *kind)
}

fn marker_for(kind: StyleKind, closing: bool) -> &'static str {
    match kind.marker() {
        Marker::Wrap(marker) => marker,
        Marker::Tag { open, close } => {
            if closing {
                close
            } else {
                open
            }
        }
    }
}

struct Tag {
    name: String,
    closing: bool,
}

impl Tag {
    /// Reads the inside of `<...>`: optional `/`, a name, then anything.
    fn read(inner: &str) -> Tag {
        let inner = inner.trim_start();
        let (closing, body) = match inner.strip_prefix('/') {
            Some(body) => (true, body.trim_start()),
            None => (false, inner),
        };
        let name = body
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Tag { name, closing }
    }
}

/// Single-pass entity decoding; `&amp;lt;` becomes `&lt;`, not `<`.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match decode_one(candidate) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes the entity at the start of `s`, returning the character and the
/// number of bytes consumed.
fn decode_one(s: &str) -> Option<(char, usize)> {
    // Longest entity we understand is `&#x10FFFF;`.
    let (semi, _) = s.char_indices().take(11).find(|(_, c)| *c == ';')?;
    let body = &s[1..semi];
    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let digits = body.strip_prefix('#')?;
            let hex = digits
                .strip_prefix('x')
                .or_else(|| digits.strip_prefix('X'));
            let code = match hex {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some((c, semi + 1))
}
