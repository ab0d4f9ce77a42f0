//! Analysis of one logical statement: literal units, assignments, calls.

use std::ops::Range;

use rowan::{TextRange, TextSize};

use super::accumulator::Lexeme;
use super::lexer::TokenKind;
use crate::Literal;
use crate::calls::{RawArgument, RawCall, TriggerKind};

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Keywords that open a statement. Used to recover from unbalanced brackets.
pub(super) const STATEMENT_KEYWORDS: &[&str] = &[
    "assert", "async", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "finally", "for", "from", "global", "if", "import", "nonlocal", "pass", "raise", "return",
    "try", "while", "with",
];

/// Compound statement headers; the statement body may follow on the same line.
const COMPOUND_KEYWORDS: &[&str] = &[
    "async", "class", "def", "elif", "else", "except", "finally", "for", "if", "try", "while",
    "with",
];

/// Keywords after which `(` starts an expression rather than a call.
const EXPRESSION_KEYWORDS: &[&str] = &[
    "and", "assert", "await", "elif", "else", "if", "in", "is", "lambda", "not", "or", "return",
    "while", "yield",
];

fn ident<'s>(text: &'s str, lexeme: &Lexeme) -> Option<&'s str> {
    match lexeme {
        Lexeme::Code(token) if token.kind == TokenKind::Ident => Some(token.text(text)),
        _ => None,
    }
}

fn is_keyword(word: &str) -> bool {
    PYTHON_KEYWORDS.contains(&word)
}

fn covering(lexemes: &[Lexeme]) -> Option<TextRange> {
    let first = lexemes.first()?.span();
    let last = lexemes.last()?.span();
    Some(TextRange::new(first.start(), last.end()))
}

/// Statement span, first lexeme to last.
pub(super) fn statement_range(lexemes: &[Lexeme]) -> TextRange {
    covering(lexemes).unwrap_or_else(|| TextRange::empty(TextSize::from(0)))
}

/// Maximal literal expressions of the statement, in order.
///
/// A literal expression is one or more terms joined by `+`; a term is a run
/// of adjacent literals or a parenthesized literal expression. Operator
/// precedence decides where a chain ends: a term next to an operator that
/// binds tighter than `+` stands alone.
pub(super) fn literal_units(text: &str, lexemes: &[Lexeme]) -> Vec<Literal> {
    let mut units = Vec::new();
    let mut i = 0;

    while i < lexemes.len() {
        if !starts_unit(text, lexemes, i) {
            i += 1;
            continue;
        }

        let single = i > 0 && binds_left(text, &lexemes[i - 1]);
        let Some((mut terms, next)) = parse_chain(lexemes, i, single) else {
            i += 1;
            continue;
        };

        let tight = lexemes.get(next).is_some_and(|l| binds_right(l));
        if tight && terms.len() > 1 {
            let last = terms.pop().unwrap_or_default();
            units.extend(Literal::concat(terms.concat()));
            units.extend(Literal::concat(last));
        } else {
            units.extend(Literal::concat(terms.concat()));
        }
        i = next;
    }

    units
}

fn starts_unit(text: &str, lexemes: &[Lexeme], i: usize) -> bool {
    match &lexemes[i] {
        Lexeme::Literal(_) => true,
        Lexeme::Code(token) if token.kind == TokenKind::ParenOpen => is_expression_paren(text, lexemes, i),
        Lexeme::Code(_) => false,
    }
}

fn is_expression_paren(text: &str, lexemes: &[Lexeme], i: usize) -> bool {
    let Some(prev) = i.checked_sub(1).map(|j| &lexemes[j]) else {
        return true;
    };
    match prev {
        Lexeme::Literal(_) => false,
        Lexeme::Code(token) => match token.kind {
            TokenKind::Ident => EXPRESSION_KEYWORDS.contains(&token.text(text)),
            k => !k.is_close_bracket(),
        },
    }
}

/// An operator on the left that captures the next term.
fn binds_left(text: &str, prev: &Lexeme) -> bool {
    match prev {
        Lexeme::Code(token) => match token.kind {
            TokenKind::Plus | TokenKind::MulOp => true,
            TokenKind::Operator => token.text(text) == "-",
            _ => false,
        },
        Lexeme::Literal(_) => false,
    }
}

/// A postfix or operator on the right that captures the previous term.
fn binds_right(next: &Lexeme) -> bool {
    matches!(
        next.kind(),
        Some(TokenKind::Dot | TokenKind::BracketOpen | TokenKind::ParenOpen | TokenKind::MulOp)
    )
}

/// Parses `term ('+' term)*` starting at `i`; with `single` only one term.
/// Returns the literal parts of each term and the index after the chain.
fn parse_chain(lexemes: &[Lexeme], i: usize, single: bool) -> Option<(Vec<Vec<Literal>>, usize)> {
    let (first, mut j) = parse_term(lexemes, i)?;
    let mut terms = vec![first];

    if !single {
        while lexemes.get(j).is_some_and(|l| l.is(TokenKind::Plus)) {
            let Some((term, k)) = parse_term(lexemes, j + 1) else {
                break;
            };
            terms.push(term);
            j = k;
        }
    }

    Some((terms, j))
}

fn parse_term(lexemes: &[Lexeme], i: usize) -> Option<(Vec<Literal>, usize)> {
    match lexemes.get(i)? {
        Lexeme::Literal(_) => {
            let parts: Vec<Literal> = lexemes[i..]
                .iter()
                .map_while(|l| l.as_literal().cloned())
                .collect();
            let next = i + parts.len();
            Some((parts, next))
        }
        Lexeme::Code(token) if token.kind == TokenKind::ParenOpen => {
            let (terms, j) = parse_chain(lexemes, i + 1, false)?;
            if !lexemes.get(j)?.is(TokenKind::ParenClose) {
                return None;
            }
            Some((terms.concat(), j + 1))
        }
        Lexeme::Code(_) => None,
    }
}

/// The whole slice as one literal expression.
fn whole_literal(lexemes: &[Lexeme]) -> Option<Literal> {
    let (terms, next) = parse_chain(lexemes, 0, false)?;
    if next != lexemes.len() {
        return None;
    }
    Literal::concat(terms.concat())
}

/// `a.b.c` as a name, if the slice is exactly that.
fn dotted_name(text: &str, lexemes: &[Lexeme]) -> Option<String> {
    let head = ident(text, lexemes.first()?)?;
    if is_keyword(head) {
        return None;
    }
    let mut name = head.to_owned();
    let mut rest = &lexemes[1..];
    while let [dot, segment, tail @ ..] = rest {
        if !dot.is(TokenKind::Dot) {
            return None;
        }
        name.push('.');
        name.push_str(ident(text, segment)?);
        rest = tail;
    }
    rest.is_empty().then_some(name)
}

/// Splits at commas outside brackets.
fn split_top_level(lexemes: &[Lexeme], sep: TokenKind) -> Vec<&[Lexeme]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (j, lexeme) in lexemes.iter().enumerate() {
        match lexeme.kind() {
            Some(k) if k.is_open_bracket() => depth += 1,
            Some(k) if k.is_close_bracket() => depth = depth.saturating_sub(1),
            Some(k) if k == sep && depth == 0 => {
                parts.push(&lexemes[start..j]);
                start = j + 1;
            }
            _ => {}
        }
    }
    parts.push(&lexemes[start..]);
    parts
}

fn strip_compound_headers<'a>(text: &str, mut lexemes: &'a [Lexeme]) -> &'a [Lexeme] {
    while lexemes
        .first()
        .and_then(|l| ident(text, l))
        .is_some_and(|word| COMPOUND_KEYWORDS.contains(&word))
    {
        let Some(colon) = top_level_position(lexemes, TokenKind::Colon) else {
            break;
        };
        lexemes = &lexemes[colon + 1..];
    }
    lexemes
}

fn top_level_position(lexemes: &[Lexeme], kind: TokenKind) -> Option<usize> {
    let mut depth = 0usize;
    for (j, lexeme) in lexemes.iter().enumerate() {
        match lexeme.kind() {
            Some(k) if k.is_open_bracket() => depth += 1,
            Some(k) if k.is_close_bracket() => depth = depth.saturating_sub(1),
            Some(k) if k == kind && depth == 0 => return Some(j),
            _ => {}
        }
    }
    None
}

/// Names assigned by the statement and the literal they receive, if any.
///
/// Chained targets all receive the value; tuple targets and non-literal
/// values yield `None`. Augmented assignment yields nothing.
pub(super) fn assignments(text: &str, lexemes: &[Lexeme]) -> Vec<(String, Option<Literal>)> {
    let lexemes = strip_compound_headers(text, lexemes);

    let mut depth = 0usize;
    let mut assigns = Vec::new();
    for (j, lexeme) in lexemes.iter().enumerate() {
        match lexeme.kind() {
            Some(k) if k.is_open_bracket() => depth += 1,
            Some(k) if k.is_close_bracket() => depth = depth.saturating_sub(1),
            Some(TokenKind::Assign) if depth == 0 => assigns.push(j),
            Some(TokenKind::AugAssign) if depth == 0 => return Vec::new(),
            _ => {}
        }
    }
    let Some(&last) = assigns.last() else {
        return Vec::new();
    };

    let value = whole_literal(&lexemes[last + 1..]);

    let mut bound = Vec::new();
    let mut start = 0;
    for &assign in &assigns {
        let target = &lexemes[start..assign];
        start = assign + 1;

        let parts = split_top_level(target, TokenKind::Comma);
        if let [single] = parts.as_slice() {
            let name_part = match top_level_position(single, TokenKind::Colon) {
                Some(colon) => &single[..colon],
                None => single,
            };
            if let Some(name) = dotted_name(text, name_part) {
                bound.push((name, value.clone()));
            }
        } else {
            bound.extend(
                parts
                    .into_iter()
                    .filter_map(|part| dotted_name(text, part))
                    .map(|name| (name, None)),
            );
        }
    }
    bound
}

/// Executor calls in the statement, nested ones included.
pub(super) fn calls(text: &str, lexemes: &[Lexeme]) -> Vec<RawCall> {
    let mut calls = Vec::new();

    for (i, lexeme) in lexemes.iter().enumerate() {
        let Some(trigger) = ident(text, lexeme).and_then(TriggerKind::from_name) else {
            continue;
        };
        if !lexemes.get(i + 1).is_some_and(|l| l.is(TokenKind::ParenOpen)) {
            continue;
        }
        if i > 0 && ident(text, &lexemes[i - 1]) == Some("def") {
            continue;
        }

        let head = callee_start(lexemes, i);
        let callee_range = Range::<usize>::from(TextRange::new(
            lexemes[head].span().start(),
            lexeme.span().end(),
        ));
        let callee: String = text[callee_range]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let (arg, close) = first_argument(lexemes, i + 1);
        let end = close
            .map(|c| lexemes[c].span().end())
            .or_else(|| lexemes.last().map(|l| l.span().end()))
            .unwrap_or(lexeme.span().end());

        calls.push(RawCall {
            trigger,
            callee,
            argument: classify_argument(text, &lexemes[arg]),
            span: TextRange::new(lexemes[head].span().start(), end),
        });
    }

    calls
}

/// Walks back over `a.b().c[0].` receivers.
fn callee_start(lexemes: &[Lexeme], i: usize) -> usize {
    let mut j = i;
    while j >= 2 && lexemes[j - 1].is(TokenKind::Dot) {
        let k = j - 2;
        match lexemes[k].kind() {
            Some(TokenKind::Ident) => j = k,
            Some(kind) if kind.is_close_bracket() => {
                match matching_open(lexemes, k) {
                    Some(open) if open >= 1 && lexemes[open - 1].is(TokenKind::Ident) => {
                        j = open - 1
                    }
                    _ => break,
                }
            }
            _ => break,
        }
    }
    j
}

fn matching_open(lexemes: &[Lexeme], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for j in (0..=close).rev() {
        match lexemes[j].kind() {
            Some(k) if k.is_close_bracket() => depth += 1,
            Some(k) if k.is_open_bracket() => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }
    None
}

/// Lexeme range of the first argument after the `(` at `open`, and the
/// index of the matching `)` when present.
fn first_argument(lexemes: &[Lexeme], open: usize) -> (Range<usize>, Option<usize>) {
    let start = open + 1;
    let mut depth = 0usize;
    let mut arg_end = None;

    for j in start..lexemes.len() {
        match lexemes[j].kind() {
            Some(k) if k.is_open_bracket() => depth += 1,
            Some(k) if k.is_close_bracket() => {
                if depth == 0 {
                    return (start..arg_end.unwrap_or(j), Some(j));
                }
                depth -= 1;
            }
            Some(TokenKind::Comma) if depth == 0 => {
                arg_end.get_or_insert(j);
            }
            _ => {}
        }
    }

    (start..arg_end.unwrap_or(lexemes.len()), None)
}

fn classify_argument(text: &str, arg: &[Lexeme]) -> RawArgument {
    if let Some(lit) = whole_literal(arg) {
        return RawArgument::Literal(lit);
    }
    match (dotted_name(text, arg), covering(arg)) {
        (Some(name), Some(range)) => RawArgument::Name { name, range },
        _ => RawArgument::Other,
    }
}
