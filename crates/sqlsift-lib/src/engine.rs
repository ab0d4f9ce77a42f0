//! Discovery engine: pass selection, merge and deduplication.

use std::path::Path;

use rowan::{TextRange, TextSize};
use tracing::{debug, warn};

use sqlsift_core::{CandidateRecord, SourceDocument};
use sqlsift_langs::Lang;

use crate::calls::CallSite;
use crate::classify::Classifier;
use crate::config::{Config, OversizePolicy, Scope};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::scanner::fallback_scan;
use crate::structured::{DegradeReason, try_structured_pass};
use crate::{Error, PassOutput, load_document};

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

/// Which passes produced a discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassMode {
    Structured,
    /// Tree-sitter pass plus the scanner over the same text.
    StructuredWithSafetyNet,
    Fallback,
    /// Nothing ran: the document was unreadable or over the size limit.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Discovery {
    /// Sorted by `(start, end)`, unique by `(text, start, end)`.
    pub records: Vec<CandidateRecord>,
    pub call_sites: Vec<CallSite>,
    pub diagnostics: Diagnostics,
    pub mode: PassMode,
}

impl Discovery {
    /// A skipped discovery carrying the reason `path` could not be loaded.
    pub fn from_load_error(path: &Path, err: Error) -> Self {
        let mut diagnostics = Diagnostics::new();
        let origin = TextRange::empty(TextSize::from(0));
        let (kind, message) = match err {
            Error::DocumentTooLarge { size, .. } => {
                (DiagnosticKind::DocumentTooLarge, size.to_string())
            }
            Error::Io { message, .. } => (DiagnosticKind::UnreadableDocument, message),
            err => (DiagnosticKind::UnreadableDocument, err.to_string()),
        };
        diagnostics.report(kind, origin).message(message).emit();
        warn!(path = %path.display(), "document skipped");
        Self::skipped(diagnostics)
    }

    fn skipped(diagnostics: Diagnostics) -> Self {
        Self {
            records: Vec::new(),
            call_sites: Vec::new(),
            diagnostics,
            mode: PassMode::Skipped,
        }
    }
}

/// Finds query literals in Python documents.
///
/// Holds no per-document state; one engine can serve many threads.
pub struct Engine {
    config: Config,
    classifier: Classifier,
    lang: Lang,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            classifier: Classifier::new(),
            lang: sqlsift_langs::python(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn discover_source(&self, source: &str) -> Discovery {
        self.discover(&SourceDocument::new(source))
    }

    /// Loads and analyzes a file. Read failures become diagnostics.
    pub fn discover_path(&self, path: &Path) -> Discovery {
        match load_document(path, &self.config) {
            Ok(doc) => self.discover(&doc),
            Err(err) => Discovery::from_load_error(path, err),
        }
    }

    pub fn discover(&self, doc: &SourceDocument) -> Discovery {
        let mut diagnostics = Diagnostics::new();
        let limit = self.config.document_limit();

        if doc.len() <= limit {
            return self.analyze(doc, diagnostics);
        }

        match self.config.oversize {
            OversizePolicy::Reject => {
                diagnostics
                    .report(DiagnosticKind::DocumentTooLarge, TextRange::empty(offset(0)))
                    .message(doc.len().to_string())
                    .emit();
                warn!(size = doc.len(), limit, "document over the size limit");
                Discovery::skipped(diagnostics)
            }
            OversizePolicy::Truncate => {
                let cut = doc.truncated(limit);
                let dropped = TextRange::new(offset(cut.len()), offset(doc.len()));
                diagnostics
                    .report(DiagnosticKind::DocumentTruncated, dropped)
                    .emit();
                self.analyze(&cut, diagnostics)
            }
        }
    }

    fn analyze(&self, doc: &SourceDocument, mut diagnostics: Diagnostics) -> Discovery {
        for &line in doc.skipped_lines() {
            let start = doc.line_range(line).start;
            diagnostics
                .report(DiagnosticKind::UndecodableLine, TextRange::empty(offset(start)))
                .emit();
        }

        let (mode, output) = self.run_passes(doc, &mut diagnostics);
        diagnostics.extend(output.diagnostics);

        let mut call_sites = output.call_sites;
        call_sites.sort_by_key(|site| (site.span.start(), site.span.end()));
        call_sites.dedup_by_key(|site| site.span);

        let mut ranges: Vec<TextRange> = call_sites
            .iter()
            .filter_map(|site| site.argument.literal())
            .map(|lit| lit.content)
            .collect();
        if self.config.scope == Scope::All {
            ranges.extend(
                output
                    .literals
                    .iter()
                    .filter(|lit| self.classifier.is_query_like(&lit.text))
                    .map(|lit| lit.content),
            );
        }

        let mut records: Vec<CandidateRecord> = ranges
            .into_iter()
            .map(|range| CandidateRecord::from_range(doc, range))
            .collect();
        records.sort_by(|a, b| {
            (a.start, a.end, &a.text).cmp(&(b.start, b.end, &b.text))
        });
        records.dedup_by(|a, b| a.key() == b.key());

        diagnostics.normalize();

        debug!(
            ?mode,
            records = records.len(),
            call_sites = call_sites.len(),
            diagnostics = diagnostics.len(),
            "discovery"
        );

        Discovery {
            records,
            call_sites,
            diagnostics,
            mode,
        }
    }

    fn run_passes(&self, doc: &SourceDocument, diagnostics: &mut Diagnostics) -> (PassMode, PassOutput) {
        if !self.config.structured {
            return (PassMode::Fallback, fallback_scan(doc));
        }

        match try_structured_pass(doc, &self.lang) {
            Ok(mut output) => {
                if !self.config.safety_net {
                    return (PassMode::Structured, output);
                }
                // scanner diagnostics are dropped in favor of the tree's
                let net = fallback_scan(doc);
                let tree_spans: Vec<TextRange> =
                    output.literals.iter().map(|lit| lit.span).collect();
                output.literals.extend(
                    net.literals
                        .into_iter()
                        .filter(|lit| !conflicts(&tree_spans, lit.span)),
                );
                output.call_sites.extend(net.call_sites.into_iter().filter(|site| {
                    site.argument
                        .literal()
                        .is_none_or(|lit| !conflicts(&tree_spans, lit.span))
                }));
                (PassMode::StructuredWithSafetyNet, output)
            }
            Err(degraded) => {
                let report = diagnostics.report(DiagnosticKind::SyntaxDegraded, degraded.range);
                match degraded.reason {
                    DegradeReason::SyntaxError => report.emit(),
                    DegradeReason::ParserUnavailable => {
                        report.message("grammar could not be loaded").emit()
                    }
                }
                warn!(reason = ?degraded.reason, "structured pass degraded");
                (PassMode::Fallback, fallback_scan(doc))
            }
        }
    }
}

/// A scanner literal that overlaps a tree literal without matching it was
/// misread; the tree is authoritative over the text it covers.
fn conflicts(tree_spans: &[TextRange], span: TextRange) -> bool {
    tree_spans
        .iter()
        .any(|&tree| tree != span && tree.start() < span.end() && span.start() < tree.end())
}

fn offset(n: usize) -> TextSize {
    TextSize::from(n as u32)
}
