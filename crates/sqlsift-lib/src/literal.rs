//! String literals and literal expressions.
//!
//! Both passes decode literal tokens through [`Literal::from_token`], so a
//! literal found by the tree-sitter pass and the same literal found by the
//! scanner are byte-for-byte identical.

use rowan::{TextRange, TextSize};

#[cfg(test)]
#[path = "literal_tests.rs"]
mod tests;

/// Stand-in for a replacement field of a template literal.
pub const PLACEHOLDER: &str = "{…}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Quoted,
    TripleQuoted,
    /// f-string: replacement fields are rendered as [`PLACEHOLDER`]
    Template,
    /// Adjacent literals or literals joined with `+`
    Concatenated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Value used for classification.
    pub text: String,
    pub kind: LiteralKind,
    /// Whole token including prefix and quotes.
    pub span: TextRange,
    /// Content between the delimiters.
    pub content: TextRange,
    /// False when the closing delimiter was never found.
    pub terminated: bool,
}

impl Literal {
    /// Decodes a literal token.
    ///
    /// `raw` is the token text (prefix, opening quote, content, and closing
    /// quote when `terminated`), `start` its absolute offset. Returns `None`
    /// when `raw` does not start with an optional prefix followed by a quote.
    pub fn from_token(raw: &str, start: TextSize, terminated: bool) -> Option<Self> {
        let prefix_len = raw
            .bytes()
            .take_while(|b| matches!(b, b'r' | b'R' | b'b' | b'B' | b'u' | b'U' | b'f' | b'F'))
            .count();
        let prefix = &raw[..prefix_len];
        let body = &raw[prefix_len..];

        let quote = body.chars().next().filter(|&c| c == '"' || c == '\'')?;
        let delim_len = if body.starts_with(&quote.to_string().repeat(3)) {
            3
        } else {
            1
        };

        let content_start = prefix_len + delim_len;
        let content_end = if terminated && raw.len() >= content_start + delim_len {
            raw.len() - delim_len
        } else {
            raw.len()
        };
        let content_text = &raw[content_start..content_end];

        let is_template = prefix.contains(['f', 'F']);
        let (kind, text) = if is_template {
            (LiteralKind::Template, render_template(content_text))
        } else if delim_len == 3 {
            (LiteralKind::TripleQuoted, content_text.to_owned())
        } else {
            (LiteralKind::Quoted, content_text.to_owned())
        };

        let offset = |n: usize| start + TextSize::from(n as u32);
        Some(Self {
            text,
            kind,
            span: TextRange::new(start, offset(raw.len())),
            content: TextRange::new(offset(content_start), offset(content_end)),
            terminated,
        })
    }

    /// Joins literal segments into one concatenated literal.
    ///
    /// Text is the segments' texts in document order; the span runs from the
    /// earliest segment start to the latest segment end.
    pub fn concat(mut parts: Vec<Literal>) -> Option<Self> {
        if parts.len() <= 1 {
            return parts.pop();
        }
        parts.sort_by_key(|p| p.span.start());

        let first = &parts[0];
        let last = &parts[parts.len() - 1];
        let span = parts
            .iter()
            .map(|p| p.span)
            .reduce(|acc, s| acc.cover(s))
            .unwrap_or(first.span);
        let content = TextRange::new(first.content.start(), last.content.end());

        Some(Self {
            text: parts.iter().map(|p| p.text.as_str()).collect(),
            kind: LiteralKind::Concatenated,
            span,
            content,
            terminated: parts.iter().all(|p| p.terminated),
        })
    }
}

/// Renders f-string content: `{{`/`}}` unescape, replacement fields become [`PLACEHOLDER`].
pub fn render_template(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                skip_replacement_field(&mut chars);
                out.push_str(PLACEHOLDER);
            }
            c => out.push(c),
        }
    }

    out
}

/// Consumes a replacement field up to its closing brace, honoring nested
/// braces and quoted strings inside the expression.
fn skip_replacement_field(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    let mut depth = 1usize;
    while let Some(c) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            '\'' | '"' => {
                for inner in chars.by_ref() {
                    if inner == c {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
}
