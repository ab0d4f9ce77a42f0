use std::sync::Arc;

use arborium_tree_sitter as tree_sitter;
use tree_sitter::Language;

pub mod builtin;

pub use builtin::*;

#[cfg(test)]
mod lib_tests;

/// User-facing language type.
pub type Lang = Arc<dyn LangImpl>;

/// Unified facade over tree-sitter's Language API.
pub trait LangImpl: Send + Sync {
    fn name(&self) -> &str;

    /// Parse source code into a tree-sitter tree.
    ///
    /// Returns `None` only when the grammar cannot be loaded into a parser;
    /// syntax errors are represented inside the returned tree.
    fn parse(&self, source: &str) -> Option<tree_sitter::Tree>;
}

#[derive(Debug)]
pub struct LangInner {
    name: String,
    ts_lang: Language,
}

impl LangInner {
    pub fn new(name: &str, ts_lang: Language) -> Self {
        Self {
            name: name.to_owned(),
            ts_lang,
        }
    }
}

impl LangImpl for LangInner {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, source: &str) -> Option<tree_sitter::Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&self.ts_lang).ok()?;
        parser.parse(source, None)
    }
}
