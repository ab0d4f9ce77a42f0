//! Delimiter-stack literal accumulator.
//!
//! Feeds one physical line at a time. Single-line literals are resolved by
//! the lexer; a triple-quote opener without its closer on the same line puts
//! the accumulator into [`ScanState::InTriple`], and following lines are
//! taken verbatim until the matching unescaped closer appears.

use std::ops::Range;

use rowan::{TextRange, TextSize};

use super::lexer::{Token, TokenKind, lex_until_triple};
use crate::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleDelimiter {
    Double,
    Single,
}

impl TripleDelimiter {
    fn from_opener(opener: &str) -> Self {
        if opener.ends_with('\'') {
            Self::Single
        } else {
            Self::Double
        }
    }

    pub fn closer(self) -> &'static str {
        match self {
            Self::Double => "\"\"\"",
            Self::Single => "'''",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTriple {
    pub delimiter: TripleDelimiter,
    /// Offset of the opener, prefix included.
    pub start: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Scanning,
    InTriple(OpenTriple),
}

/// One unit of a line: a code token or a complete literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    Code(Token),
    Literal(Literal),
}

impl Lexeme {
    pub fn span(&self) -> TextRange {
        match self {
            Self::Code(token) => token.span,
            Self::Literal(lit) => lit.span,
        }
    }

    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Self::Code(token) => Some(token.kind),
            Self::Literal(_) => None,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            Self::Code(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    state: ScanState,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ScanState::InTriple(_))
    }

    /// Processes the line at `line` (terminator excluded) of `text`.
    ///
    /// Returns the line's lexemes in order. A literal that closes on this
    /// line is returned whole, even if it opened on an earlier line.
    pub fn feed_line(&mut self, text: &str, line: Range<usize>) -> Vec<Lexeme> {
        let mut out = Vec::new();
        let mut pos = line.start;

        loop {
            match self.state {
                ScanState::InTriple(open) => {
                    let closer = open.delimiter.closer();
                    let Some(rel) = find_closer(&text[pos..line.end], closer) else {
                        return out;
                    };
                    let end = pos + rel + closer.len();
                    if let Some(lit) = literal_at(text, open.start..end, true) {
                        out.push(Lexeme::Literal(lit));
                    }
                    self.state = ScanState::Scanning;
                    pos = end;
                }
                ScanState::Scanning => {
                    let (tokens, opener) = lex_until_triple(&text[pos..line.end], pos);
                    out.extend(tokens.into_iter().map(|token| lexeme_for(text, token)));

                    let Some(opener) = opener else {
                        return out;
                    };
                    let range = Range::<usize>::from(opener.span);
                    self.state = ScanState::InTriple(OpenTriple {
                        delimiter: TripleDelimiter::from_opener(&text[range.clone()]),
                        start: range.start,
                    });
                    pos = range.end;
                }
            }
        }
    }

    /// Ends the document. An open triple literal becomes a best-effort
    /// literal running to the end of the text, with `terminated = false`.
    pub fn finish(&mut self, text: &str) -> Option<Literal> {
        match std::mem::take(&mut self.state) {
            ScanState::InTriple(open) => literal_at(text, open.start..text.len(), false),
            ScanState::Scanning => None,
        }
    }
}

fn lexeme_for(text: &str, token: Token) -> Lexeme {
    let range = Range::<usize>::from(token.span);
    let literal = match token.kind {
        TokenKind::String => literal_at(text, range, true),
        TokenKind::UnterminatedString => literal_at(text, range, false),
        _ => None,
    };
    match literal {
        Some(lit) => Lexeme::Literal(lit),
        None => Lexeme::Code(token),
    }
}

fn literal_at(text: &str, range: Range<usize>, terminated: bool) -> Option<Literal> {
    Literal::from_token(
        &text[range.clone()],
        TextSize::from(range.start as u32),
        terminated,
    )
}

/// Byte offset of the first `closer` in `haystack` not preceded by an escaping backslash.
pub fn find_closer(haystack: &str, closer: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i..].starts_with(closer.as_bytes()) {
            return Some(i);
        }
        i += 1;
    }
    None
}
