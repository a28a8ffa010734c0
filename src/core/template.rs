//! Key/value render templates
//!
//! A template is literal text with `{key}` and `{value}` placeholders.
//! A placeholder may carry flags after `:`:
//!
//! - `q` quotes the text with back-ticks, or with escaped double quotes
//!   when back-ticks can't represent it
//! - `?` renders the debug form (strings double-quoted)
//! - `<N` / `>N` pads to width `N`, left or right aligned
//!
//! `{{` and `}}` produce literal braces. Anything else in braces is kept as
//! literal text, so a malformed template still renders.

use super::value::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Key,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Backtick,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder {
        field: Field,
        quote: Quote,
        pad: Option<(Align, usize)>,
    },
}

/// Parsed key/value template.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let rest = &source[start + 1..];
                    match rest.find('}') {
                        Some(end) => {
                            let inner = &rest[..end];
                            match parse_placeholder(inner) {
                                Some(segment) => {
                                    if !literal.is_empty() {
                                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                                    }
                                    segments.push(segment);
                                }
                                None => {
                                    literal.push('{');
                                    literal.push_str(inner);
                                    literal.push('}');
                                }
                            }
                            // Skip the placeholder body and its closing brace.
                            for _ in 0..inner.chars().count() + 1 {
                                chars.next();
                            }
                        }
                        None => literal.push('{'),
                    }
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Append the rendered `key`/`value` pair to `out`.
    pub fn render_into(&self, key: &str, value: &Value, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { field, quote, pad } => {
                    let text = match (field, quote) {
                        (Field::Key, Quote::None) => key.to_string(),
                        (Field::Key, Quote::Backtick) => quote_backtick(key),
                        (Field::Key, Quote::Debug) => format!("{:?}", key),
                        (Field::Value, Quote::None) => value.to_string(),
                        (Field::Value, Quote::Backtick) => quote_backtick(&value.to_string()),
                        (Field::Value, Quote::Debug) => value.to_debug_string(),
                    };
                    push_padded(out, &text, *pad);
                }
            }
        }
    }

    pub fn render(&self, key: &str, value: &Value) -> String {
        let mut out = String::new();
        self.render_into(key, value, &mut out);
        out
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template({:?})", self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Template::parse(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Template::parse(&source)
    }
}

fn parse_placeholder(inner: &str) -> Option<Segment> {
    let (name, flags) = match inner.split_once(':') {
        Some((name, flags)) => (name, flags),
        None => (inner, ""),
    };
    let field = match name {
        "key" => Field::Key,
        "value" => Field::Value,
        _ => return None,
    };

    let mut rest = flags;
    let quote = if let Some(r) = rest.strip_prefix('q') {
        rest = r;
        Quote::Backtick
    } else if let Some(r) = rest.strip_prefix('?') {
        rest = r;
        Quote::Debug
    } else {
        Quote::None
    };

    let pad = if rest.is_empty() {
        None
    } else {
        let (align, digits) = if let Some(d) = rest.strip_prefix('<') {
            (Align::Left, d)
        } else if let Some(d) = rest.strip_prefix('>') {
            (Align::Right, d)
        } else {
            (Align::Left, rest)
        };
        let width = digits.parse::<usize>().ok()?;
        Some((align, width))
    };

    Some(Segment::Placeholder { field, quote, pad })
}

fn push_padded(out: &mut String, text: &str, pad: Option<(Align, usize)>) {
    let Some((align, width)) = pad else {
        out.push_str(text);
        return;
    };
    let fill = width.saturating_sub(text.chars().count());
    match align {
        Align::Left => {
            out.push_str(text);
            out.extend(std::iter::repeat(' ').take(fill));
        }
        Align::Right => {
            out.extend(std::iter::repeat(' ').take(fill));
            out.push_str(text);
        }
    }
}

/// Back-tick quote `s` when possible, otherwise fall back to an escaped
/// double-quoted string.
fn quote_backtick(s: &str) -> String {
    let can_backquote = s
        .chars()
        .all(|c| c != '`' && c != '\u{FEFF}' && (c == '\t' || !c.is_control()));
    if can_backquote {
        format!("`{}`", s)
    } else {
        format!("{:?}", s)
    }
}
