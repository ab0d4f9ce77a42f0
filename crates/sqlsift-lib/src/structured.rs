//! Tree-sitter pass.
//!
//! Runs only on source that parses without errors; any `ERROR` or `MISSING`
//! node makes the pass give up so the engine can fall back to the scanner.
//! Literals are decoded through [`Literal::from_token`], so both passes agree
//! on text and spans for well-formed code.

use arborium_tree_sitter as tree_sitter;
use rowan::{TextRange, TextSize};
use tracing::debug;

use sqlsift_core::SourceDocument;
use sqlsift_langs::Lang;

use crate::calls::{RawArgument, RawCall, TriggerKind};
use crate::diagnostics::Diagnostics;
use crate::{BindingTable, Literal, PassOutput};

#[cfg(test)]
#[path = "structured_tests.rs"]
mod tests;

/// Nesting limit for literal expressions such as long `+` chains.
const MAX_EXPR_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// The grammar could not be loaded into a parser.
    ParserUnavailable,
    SyntaxError,
}

/// Why the tree-sitter pass gave up, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degraded {
    pub reason: DegradeReason,
    /// First error or missing node, or an empty range at 0.
    pub range: TextRange,
}

pub fn try_structured_pass(doc: &SourceDocument, lang: &Lang) -> Result<PassOutput, Degraded> {
    let src = doc.text();
    let Some(tree) = lang.parse(src) else {
        return Err(Degraded {
            reason: DegradeReason::ParserUnavailable,
            range: TextRange::empty(TextSize::from(0)),
        });
    };

    let root = tree.root_node();
    if root.has_error() {
        return Err(Degraded {
            reason: DegradeReason::SyntaxError,
            range: first_error(root).map_or_else(|| TextRange::empty(TextSize::from(0)), range_of),
        });
    }

    let mut walker = Walker {
        src,
        literals: Vec::new(),
        calls: Vec::new(),
        bindings: BindingTable::new(),
    };
    walker.walk(root);

    let mut diagnostics = Diagnostics::new();
    let call_sites = walker
        .calls
        .into_iter()
        .map(|call| call.resolve(&walker.bindings, &mut diagnostics))
        .collect::<Vec<_>>();

    debug!(
        literals = walker.literals.len(),
        call_sites = call_sites.len(),
        bindings = walker.bindings.len(),
        "structured pass"
    );

    Ok(PassOutput {
        literals: walker.literals,
        call_sites,
        bindings: walker.bindings,
        diagnostics,
    })
}

fn range_of(node: tree_sitter::Node) -> TextRange {
    TextRange::new(
        TextSize::from(node.start_byte() as u32),
        TextSize::from(node.end_byte() as u32),
    )
}

fn first_error(root: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

struct Walker<'s> {
    src: &'s str,
    literals: Vec<Literal>,
    calls: Vec<RawCall>,
    bindings: BindingTable,
}

impl<'s> Walker<'s> {
    fn text(&self, node: tree_sitter::Node) -> &'s str {
        self.src.get(node.start_byte()..node.end_byte()).unwrap_or_default()
    }

    /// Pre-order walk. Literal expressions are recorded whole and not entered.
    fn walk(&mut self, root: tree_sitter::Node) {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            let descend = self.visit(node);
            if descend && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    fn visit(&mut self, node: tree_sitter::Node) -> bool {
        if let Some(parts) = self.literal_parts(node, 0) {
            self.literals.extend(Literal::concat(parts));
            return false;
        }
        match node.kind() {
            "call" => self.visit_call(node),
            "assignment" if node.parent().is_none_or(|p| p.kind() != "assignment") => {
                self.visit_assignment(node)
            }
            _ => {}
        }
        true
    }

    /// Segments of a literal expression: strings joined by adjacency or `+`,
    /// possibly parenthesized.
    fn literal_parts(&self, node: tree_sitter::Node, depth: usize) -> Option<Vec<Literal>> {
        if depth > MAX_EXPR_DEPTH {
            return None;
        }
        match node.kind() {
            "string" => {
                let start = TextSize::from(node.start_byte() as u32);
                Literal::from_token(self.text(node), start, true).map(|lit| vec![lit])
            }
            "concatenated_string" => {
                let mut cursor = node.walk();
                let mut parts = Vec::new();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "comment" {
                        continue;
                    }
                    parts.extend(self.literal_parts(child, depth + 1)?);
                }
                Some(parts)
            }
            "binary_operator" => {
                let operator = node.child_by_field_name("operator")?;
                if self.text(operator) != "+" {
                    return None;
                }
                let mut parts = self.literal_parts(node.child_by_field_name("left")?, depth + 1)?;
                parts.extend(self.literal_parts(node.child_by_field_name("right")?, depth + 1)?);
                Some(parts)
            }
            "parenthesized_expression" => {
                let inner = first_named_child(node)?;
                self.literal_parts(inner, depth + 1)
            }
            _ => None,
        }
    }

    fn visit_call(&mut self, node: tree_sitter::Node) {
        let Some(function) = node.child_by_field_name("function") else {
            return;
        };
        let callee: String = self
            .text(function)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let Some(trigger) = TriggerKind::from_callee(&callee) else {
            return;
        };

        let argument = node
            .child_by_field_name("arguments")
            .filter(|args| args.kind() == "argument_list")
            .and_then(first_named_child)
            .map_or(RawArgument::Other, |arg| self.argument(arg));

        self.calls.push(RawCall {
            trigger,
            callee,
            argument,
            span: range_of(node),
        });
    }

    fn argument(&self, arg: tree_sitter::Node) -> RawArgument {
        if let Some(lit) = self.literal_parts(arg, 0).and_then(Literal::concat) {
            return RawArgument::Literal(lit);
        }
        match self.dotted_name(arg) {
            Some(name) => RawArgument::Name {
                name,
                range: range_of(arg),
            },
            None => RawArgument::Other,
        }
    }

    fn dotted_name(&self, node: tree_sitter::Node) -> Option<String> {
        match node.kind() {
            "identifier" => Some(self.text(node).to_owned()),
            "attribute" => {
                let object = self.dotted_name(node.child_by_field_name("object")?)?;
                let attribute = node.child_by_field_name("attribute")?;
                Some(format!("{object}.{}", self.text(attribute)))
            }
            _ => None,
        }
    }

    /// Outermost assignment of a chain such as `a = b = "..."`.
    fn visit_assignment(&mut self, node: tree_sitter::Node) {
        if self.contains_executor_call(node) {
            return;
        }

        let mut targets = Vec::new();
        let mut current = node;
        let value = loop {
            if let Some(left) = current.child_by_field_name("left") {
                targets.push(left);
            }
            match current.child_by_field_name("right") {
                Some(right) if right.kind() == "assignment" => current = right,
                Some(right) => break Some(right),
                None => break None,
            }
        };
        // Bare annotation: `x: int`
        let Some(value) = value else {
            return;
        };

        let literal = self.literal_parts(value, 0).and_then(Literal::concat);
        let defined_at = range_of(node);

        for target in targets {
            match target.kind() {
                "identifier" | "attribute" => {
                    if let Some(name) = self.dotted_name(target) {
                        self.bindings.bind(name, literal.clone(), defined_at);
                    }
                }
                "pattern_list" | "tuple_pattern" | "list_pattern" => {
                    let mut cursor = target.walk();
                    for element in target.named_children(&mut cursor) {
                        if let Some(name) = self.dotted_name(element) {
                            self.bindings.bind(name, None, defined_at);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn contains_executor_call(&self, node: tree_sitter::Node) -> bool {
        let mut cursor = node.walk();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if current.kind() == "call"
                && current
                    .child_by_field_name("function")
                    .is_some_and(|f| TriggerKind::from_callee(self.text(f).trim()).is_some())
            {
                return true;
            }
            stack.extend(current.named_children(&mut cursor));
        }
        false
    }
}

fn first_named_child(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() != "comment")
}
