//! Variable binding table.
//!
//! One flat table per document, ordered by position. There is no lexical
//! scoping: a later assignment anywhere in the document shadows earlier ones
//! for every lookup that comes after it.

use indexmap::IndexMap;
use rowan::{TextRange, TextSize};

use crate::Literal;

#[cfg(test)]
#[path = "bindings_tests.rs"]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    /// `None` when the assigned value is not a literal expression.
    pub value: Option<Literal>,
    /// The whole assignment statement.
    pub defined_at: TextRange,
}

#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    by_name: IndexMap<String, Vec<Binding>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Option<Literal>, defined_at: TextRange) {
        let name = name.into();
        let entries = self.by_name.entry(name.clone()).or_default();
        let binding = Binding {
            name,
            value,
            defined_at,
        };
        let idx = entries.partition_point(|b| b.defined_at.end() <= defined_at.end());
        entries.insert(idx, binding);
    }

    /// Most recent binding of `name` whose statement ends at or before `at`.
    pub fn lookup(&self, name: &str, at: TextSize) -> Option<&Binding> {
        let entries = self.by_name.get(name)?;
        let idx = entries.partition_point(|b| b.defined_at.end() <= at);
        idx.checked_sub(1).map(|i| &entries[i])
    }

    /// The literal visible for `name` at `at`, if the latest binding holds one.
    pub fn resolve(&self, name: &str, at: TextSize) -> Option<&Literal> {
        self.lookup(name, at)?.value.as_ref()
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All bindings, grouped by name in first-definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.by_name.values().flatten()
    }
}
