//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("sqlsift")
        .about("Find SQL query literals in Python source")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(scan_command())
        .subcommand(classify_command())
        .subcommand(tree_command())
        .subcommand(langs_command())
}

/// Discover query literals and print them as JSON records.
pub fn scan_command() -> Command {
    Command::new("scan")
        .about("Discover query literals and print them as JSON records")
        .override_usage(
            "\
  sqlsift scan <SOURCE>
  sqlsift scan -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  sqlsift scan app.py                      # every query-like literal
  sqlsift scan app.py --scope executed     # executor arguments only
  sqlsift scan app.py --diagnostics        # also report what went wrong
  sqlsift scan -s 'cur.execute("SELECT 1")'
  cat app.py | sqlsift scan -              # from stdin"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(scope_arg())
        .arg(no_safety_net_arg())
        .arg(fallback_only_arg())
        .arg(max_bytes_arg())
        .arg(oversize_arg())
        .arg(config_arg())
        .arg(compact_arg())
        .arg(diagnostics_arg())
        .arg(color_arg())
}

/// Decide whether a piece of text looks like a query.
pub fn classify_command() -> Command {
    Command::new("classify")
        .about("Decide whether a piece of text looks like a query")
        .after_help(
            r#"EXAMPLES:
  sqlsift classify 'SELECT * FROM users'
  sqlsift classify 'SELCT * FORM users'    # typos are tolerated
  sqlsift classify --json 'Hello world'"#,
        )
        .arg(text_arg())
        .arg(json_arg())
}

/// Show the tree-sitter syntax tree of Python source.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the syntax tree of Python source")
        .override_usage(
            "\
  sqlsift tree <SOURCE>
  sqlsift tree -s <TEXT>",
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(raw_arg())
        .arg(spans_arg())
}

/// List supported languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List supported languages")
}
