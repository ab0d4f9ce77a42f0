//! sqlsift: finds SQL query literals embedded in Python source.
//!
//! The pipeline:
//! - `scanner` - line-oriented literal accumulator, binding table and call-site
//!   resolver that works on any input, including source that does not parse
//! - `structured` - the same analysis over a tree-sitter syntax tree
//! - `classify` - typo-tolerant "does this look like SQL" heuristic
//! - `engine` - runs the passes, merges and deduplicates their records
//! - `diagnostics` - degraded parses, unterminated literals, unresolved names

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bindings;
pub mod calls;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod literal;
pub mod scanner;
pub mod structured;

mod source;

use std::path::PathBuf;

pub use bindings::{Binding, BindingTable};
pub use calls::{ArgumentForm, CallSite, TriggerKind};
pub use classify::{Classifier, MatchedRule, Tier, Verdict};
pub use config::{Config, OversizePolicy, Scope};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use engine::{Discovery, Engine, PassMode};
pub use literal::{Literal, LiteralKind};
pub use source::load_document;

pub use sqlsift_core::{CandidateRecord, LineCol, SourceDocument};

/// What one analysis pass hands back to the engine.
///
/// The structured pass and the fallback scanner both produce this shape so
/// the engine can merge them without caring which one ran.
#[derive(Debug, Clone, Default)]
pub struct PassOutput {
    /// Maximal literal expressions, in document order.
    pub literals: Vec<Literal>,
    pub call_sites: Vec<CallSite>,
    pub bindings: BindingTable,
    pub diagnostics: Diagnostics,
}

/// Errors surfaced to callers that load documents or configuration.
///
/// Nothing inside the extraction passes returns these; per-document problems
/// become diagnostics instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("document is {size} bytes, limit is {limit}")]
    DocumentTooLarge { size: usize, limit: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for sqlsift operations.
pub type Result<T> = std::result::Result<T, Error>;
