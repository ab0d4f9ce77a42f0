//! Line-oriented fallback pass.
//!
//! Works on any input, including source that does not parse. Lines go
//! through the [`Accumulator`], which yields code tokens and complete
//! literals; lines are grouped into logical statements by bracket depth,
//! backslash continuation, `;`, and open triple-quoted literals. Each
//! statement is then searched for literal expressions, assignments and
//! executor calls.

mod accumulator;
mod lexer;
mod statement;

#[cfg(test)]
mod scanner_tests;

use tracing::debug;

use sqlsift_core::SourceDocument;

use crate::PassOutput;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

pub use accumulator::{Accumulator, Lexeme, OpenTriple, ScanState, TripleDelimiter, find_closer};
pub use lexer::{Token, TokenKind, lex_until_triple};

/// Runs the line scanner, binding table and call-site resolver over `doc`.
pub fn fallback_scan(doc: &SourceDocument) -> PassOutput {
    let text = doc.text();
    let mut diagnostics = Diagnostics::new();
    let statements = split_statements(doc, &mut diagnostics);

    let mut out = PassOutput::default();
    let mut raw_calls = Vec::new();

    for lexemes in &statements {
        out.literals.extend(statement::literal_units(text, lexemes));

        let calls = statement::calls(text, lexemes);
        if calls.is_empty() {
            let defined_at = statement::statement_range(lexemes);
            for (name, value) in statement::assignments(text, lexemes) {
                out.bindings.bind(name, value, defined_at);
            }
        }
        raw_calls.extend(calls);
    }

    out.call_sites = raw_calls
        .into_iter()
        .map(|call| call.resolve(&out.bindings, &mut diagnostics))
        .collect();
    out.diagnostics = diagnostics;

    debug!(
        statements = statements.len(),
        literals = out.literals.len(),
        call_sites = out.call_sites.len(),
        bindings = out.bindings.len(),
        "fallback scan"
    );

    out
}

/// Groups the document's lexemes into logical statements.
fn split_statements(doc: &SourceDocument, diagnostics: &mut Diagnostics) -> Vec<Vec<Lexeme>> {
    let text = doc.text();
    let mut acc = Accumulator::new();
    let mut statements = Vec::new();
    let mut current: Vec<Lexeme> = Vec::new();
    let mut depth = 0usize;
    let mut indent = 0usize;
    let mut continued = false;

    for line in 1..=doc.line_count() {
        let line_text = doc.line_text(line);
        let start = doc.line_range(line).start;
        let resumed = acc.is_open();
        let lexemes = acc.feed_line(text, start..start + line_text.len());
        let line_indent = indentation(line_text);

        // Unbalanced brackets: a new statement at the same or lower indent ends the old one.
        if depth > 0
            && !resumed
            && !continued
            && line_indent <= indent
            && starts_statement(text, &lexemes)
        {
            flush(&mut statements, &mut current);
            depth = 0;
        }
        if current.is_empty() && !resumed {
            indent = line_indent;
        }

        continued = lexemes.last().is_some_and(|l| l.is(TokenKind::Backslash));

        for lexeme in lexemes {
            if let Lexeme::Literal(lit) = &lexeme
                && !lit.terminated
            {
                diagnostics
                    .report(DiagnosticKind::UnterminatedLiteral, lit.span)
                    .emit();
            }
            match lexeme.kind() {
                Some(TokenKind::Backslash) => continue,
                Some(TokenKind::Semicolon) if depth == 0 => {
                    flush(&mut statements, &mut current);
                    continue;
                }
                Some(k) if k.is_open_bracket() => depth += 1,
                Some(k) if k.is_close_bracket() => depth = depth.saturating_sub(1),
                _ => {}
            }
            current.push(lexeme);
        }

        if depth == 0 && !continued && !acc.is_open() {
            flush(&mut statements, &mut current);
        }
    }

    if let ScanState::InTriple(open) = acc.state()
        && let Some(lit) = acc.finish(text)
    {
        diagnostics
            .report(DiagnosticKind::UnterminatedLiteral, lit.span)
            .message(format!("missing closing `{}`", open.delimiter.closer()))
            .emit();
        current.push(Lexeme::Literal(lit));
    }
    flush(&mut statements, &mut current);

    statements
}

fn flush(statements: &mut Vec<Vec<Lexeme>>, current: &mut Vec<Lexeme>) {
    if !current.is_empty() {
        statements.push(std::mem::take(current));
    }
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Whether a line opens with a keyword statement, a decorator, or `name =`.
fn starts_statement(text: &str, lexemes: &[Lexeme]) -> bool {
    let Some(Lexeme::Code(first)) = lexemes.first() else {
        return false;
    };
    match first.kind {
        TokenKind::MulOp => first.text(text) == "@",
        TokenKind::Ident => {
            if statement::STATEMENT_KEYWORDS.contains(&first.text(text)) {
                return true;
            }
            let mut i = 1;
            while lexemes.get(i).is_some_and(|l| l.is(TokenKind::Dot))
                && lexemes.get(i + 1).is_some_and(|l| l.is(TokenKind::Ident))
            {
                i += 2;
            }
            lexemes.get(i).is_some_and(|l| l.is(TokenKind::Assign))
        }
        _ => false,
    }
}
