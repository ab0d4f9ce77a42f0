use std::path::PathBuf;
use std::process::exit;

use arborium_tree_sitter as tree_sitter;

use super::source_loader::load_source;

pub struct TreeArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: String,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: TreeArgs) {
    let source = load_source(args.source_path.as_deref(), args.source_text.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {msg}");
            exit(1);
        });

    let Some(lang) = sqlsift_langs::from_name(&args.lang) else {
        eprintln!("error: unknown language: {}", args.lang);
        eprintln!();
        eprintln!("Run 'sqlsift langs' for the full list.");
        exit(1);
    };
    let Some(tree) = lang.parse(&source) else {
        eprintln!("error: the {} grammar could not be loaded", lang.name());
        exit(1);
    };
    print!("{}", dump_tree(&tree, &source, args.raw, args.spans));
}

pub fn dump_tree(tree: &tree_sitter::Tree, source: &str, raw: bool, spans: bool) -> String {
    format_node(tree.root_node(), None, source, 0, raw, spans) + "\n"
}

fn format_node(
    node: tree_sitter::Node,
    field_name: Option<&str>,
    source: &str,
    depth: usize,
    include_anonymous: bool,
    show_spans: bool,
) -> String {
    let indent = "  ".repeat(depth);
    let kind = node.kind();
    let field_prefix = field_name.map(|f| format!("{f}: ")).unwrap_or_default();
    let span_suffix = if show_spans {
        // byte offsets, unlike record start/end which count characters
        format!(" [{}..{}]", node.start_byte(), node.end_byte())
    } else {
        String::new()
    };

    let mut children = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if include_anonymous || child.is_named() {
                children.push((child, cursor.field_name()));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    if children.is_empty() {
        let text = node
            .utf8_text(source.as_bytes())
            .unwrap_or("<invalid utf8>");
        return if text == kind {
            format!("{indent}{field_prefix}(\"{}\"){span_suffix}", escape_string(kind))
        } else {
            format!(
                "{indent}{field_prefix}({kind} \"{}\"){span_suffix}",
                escape_string(text)
            )
        };
    }

    let mut out = format!("{indent}{field_prefix}({kind}{span_suffix}");
    for (child, child_field) in children {
        out.push('\n');
        out.push_str(&format_node(
            child,
            child_field,
            source,
            depth + 1,
            include_anonymous,
            show_spans,
        ));
    }
    out.push(')');
    out
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            c if c.is_control() => result.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => result.push(c),
        }
    }
    result
}
