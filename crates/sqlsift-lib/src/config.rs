//! Engine configuration.

use serde::Deserialize;

use crate::{Error, Result};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Which literals become records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Executor arguments plus every literal the classifier accepts.
    #[default]
    All,
    /// Only literals that reach an executor call.
    Executed,
}

/// What to do with a document above `max_document_bytes`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OversizePolicy {
    /// Produce no records and an error diagnostic.
    #[default]
    Reject,
    /// Analyze the prefix that ends at the last line boundary under the limit.
    Truncate,
}

pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 8 * 1024 * 1024;

/// Largest accepted limit; spans are `u32` byte offsets.
pub const MAX_DOCUMENT_BYTES: usize = u32::MAX as usize;

/// Configuration for a discovery run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub(crate) scope: Scope,
    /// Attempt the tree-sitter pass before falling back to the scanner
    pub(crate) structured: bool,
    /// Run the scanner even when the tree-sitter pass succeeds
    pub(crate) safety_net: bool,
    pub(crate) max_document_bytes: usize,
    pub(crate) oversize: OversizePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope: Scope::default(),
            structured: true,
            safety_net: true,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            oversize: OversizePolicy::default(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, value: Scope) -> Self {
        self.scope = value;
        self
    }

    /// Set whether to attempt the tree-sitter pass.
    pub fn structured(mut self, value: bool) -> Self {
        self.structured = value;
        self
    }

    /// Set whether the scanner also runs after a successful tree-sitter pass.
    pub fn safety_net(mut self, value: bool) -> Self {
        self.safety_net = value;
        self
    }

    pub fn max_document_bytes(mut self, value: usize) -> Self {
        self.max_document_bytes = value;
        self
    }

    pub fn oversize(mut self, value: OversizePolicy) -> Self {
        self.oversize = value;
        self
    }

    /// The size limit, capped at [`MAX_DOCUMENT_BYTES`] for configs that
    /// skipped [`Self::validate`].
    pub fn document_limit(&self) -> usize {
        self.max_document_bytes.min(MAX_DOCUMENT_BYTES)
    }

    pub fn validate(self) -> Result<Self> {
        if self.max_document_bytes == 0 {
            return Err(Error::Config("max-document-bytes must be positive".into()));
        }
        if self.max_document_bytes > MAX_DOCUMENT_BYTES {
            return Err(Error::Config(format!(
                "max-document-bytes must be at most {MAX_DOCUMENT_BYTES}"
            )));
        }
        Ok(self)
    }
}
