//! Executor call sites and their query argument.

use rowan::TextRange;
use tracing::trace;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{BindingTable, Literal};

#[cfg(test)]
#[path = "calls_tests.rs"]
mod tests;

/// Executor operation families, recognized by the callee's last name segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// `execute`, `executemany`, `executescript`, `exec_driver_sql`
    Execute,
    /// `fetch`, `fetchrow`, `fetchval` (asyncpg style)
    Fetch,
    /// `read_sql`, `read_sql_query`
    BulkRead,
    /// `copy_expert`
    BulkCopy,
}

impl TriggerKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "execute" | "executemany" | "executescript" | "exec_driver_sql" => Some(Self::Execute),
            "fetch" | "fetchrow" | "fetchval" => Some(Self::Fetch),
            "read_sql" | "read_sql_query" => Some(Self::BulkRead),
            "copy_expert" => Some(Self::BulkCopy),
            _ => None,
        }
    }

    /// Matches the last segment of a dotted callee such as `conn.cursor().execute`.
    pub fn from_callee(callee: &str) -> Option<Self> {
        let last = callee.rsplit('.').next()?;
        Self::from_name(last.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Execute => "execute",
            Self::Fetch => "fetch",
            Self::BulkRead => "bulk-read",
            Self::BulkCopy => "bulk-copy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentForm {
    InlineLiteral(Literal),
    VariableReference { name: String, literal: Literal },
    /// A name with no visible literal binding, or an argument of any other shape.
    Unresolved { name: Option<String> },
}

impl ArgumentForm {
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Self::InlineLiteral(lit) | Self::VariableReference { literal: lit, .. } => Some(lit),
            Self::Unresolved { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub trigger: TriggerKind,
    /// Callee text with whitespace removed, e.g. `self.cur.execute`.
    pub callee: String,
    pub argument: ArgumentForm,
    /// From the start of the callee to the closing parenthesis (or as far as
    /// the call was seen).
    pub span: TextRange,
}

/// First positional argument as seen by a pass, before binding lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawArgument {
    Literal(Literal),
    Name { name: String, range: TextRange },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawCall {
    pub trigger: TriggerKind,
    pub callee: String,
    pub argument: RawArgument,
    pub span: TextRange,
}

impl RawCall {
    pub(crate) fn resolve(self, bindings: &BindingTable, diagnostics: &mut Diagnostics) -> CallSite {
        let argument = match self.argument {
            RawArgument::Literal(lit) => ArgumentForm::InlineLiteral(lit),
            RawArgument::Name { name, range } => match bindings.resolve(&name, self.span.start()) {
                Some(lit) => ArgumentForm::VariableReference {
                    name,
                    literal: lit.clone(),
                },
                None => {
                    diagnostics
                        .report(DiagnosticKind::UnresolvedReference, range)
                        .message(&name)
                        .related_to(format!("passed to `{}`", self.callee), self.span)
                        .emit();
                    ArgumentForm::Unresolved { name: Some(name) }
                }
            },
            RawArgument::Other => ArgumentForm::Unresolved { name: None },
        };

        trace!(callee = %self.callee, ?argument, "call site");

        CallSite {
            trigger: self.trigger,
            callee: self.callee,
            argument,
            span: self.span,
        }
    }
}
