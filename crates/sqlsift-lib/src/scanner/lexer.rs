//! Lexer for one physical line of Python code.
//!
//! Produces span-based tokens without storing text. String tokens are only
//! recognized when they open and close on the same line; a triple-quote
//! opener stops lexing so the accumulator can take over.
//!
//! ## Error handling
//!
//! Consecutive unrecognized characters are coalesced into single `Garbage`
//! tokens, so malformed input never stops the scan.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r#"[rRbBuUfF]{0,2}"(?:[^"\\]|\\.)*""#)]
    #[regex(r#"[rRbBuUfF]{0,2}'(?:[^'\\]|\\.)*'"#)]
    String,

    /// Single-quoted string still open at the end of the line
    #[regex(r#"[rRbBuUfF]{0,2}"(?:[^"\\]|\\.)*\\?"#, allow_greedy = true)]
    #[regex(r#"[rRbBuUfF]{0,2}'(?:[^'\\]|\\.)*\\?"#, allow_greedy = true)]
    UnterminatedString,

    #[regex(r#"[rRbBuUfF]{0,2}""""#)]
    #[regex(r#"[rRbBuUfF]{0,2}'''"#)]
    TripleOpen,

    #[regex(r"[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*")]
    Ident,

    #[regex(r"[0-9][0-9A-Za-z_]*(?:\.[0-9A-Za-z_]*)?")]
    Number,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Assign,

    #[token(":=")]
    Walrus,

    #[token("->")]
    Arrow,

    #[token("+")]
    Plus,

    #[regex(r"(?:\+|-|\*\*?|//?|%|@|&|\||\^|<<|>>)=")]
    AugAssign,

    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    Compare,

    /// Binds tighter than `+`
    #[regex(r"\*\*?|//?|%|@")]
    MulOp,

    /// Binds looser than `+`, or unary
    #[regex(r"<<|>>|[-<>&|^~!]")]
    Operator,

    #[token("\\")]
    Backslash,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    #[regex(r"[ \t\x0C\r]+")]
    Whitespace,

    /// Coalesced unrecognized characters
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    pub fn is_open_bracket(self) -> bool {
        matches!(self, Self::ParenOpen | Self::BracketOpen | Self::BraceOpen)
    }

    pub fn is_close_bracket(self) -> bool {
        matches!(self, Self::ParenClose | Self::BracketClose | Self::BraceClose)
    }
}

/// Zero-copy token: kind + absolute span into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[Range::<usize>::from(self.span)]
    }
}

fn range_to_text_range(range: Range<usize>, base: usize) -> TextRange {
    TextRange::new(
        ((base + range.start) as u32).into(),
        ((base + range.end) as u32).into(),
    )
}

/// Tokenizes `segment` (which starts at document offset `base`) up to the
/// first triple-quote opener.
///
/// Returns the non-trivia tokens before the opener and the opener itself.
pub fn lex_until_triple(segment: &str, base: usize) -> (Vec<Token>, Option<Token>) {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(segment);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..end, base),
                    ));
                }

                let span = range_to_text_range(lexer.span(), base);
                if kind == TokenKind::TripleOpen {
                    return (tokens, Some(Token::new(kind, span)));
                }
                if !kind.is_trivia() {
                    tokens.push(Token::new(kind, span));
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..segment.len(), base),
                    ));
                }
                return (tokens, None);
            }
        }
    }
}
