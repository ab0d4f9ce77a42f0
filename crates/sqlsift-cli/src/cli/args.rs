//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Python source file (positional, `-` for stdin).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Python source file, or - for stdin")
}

/// Inline source text (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .conflicts_with("source_path")
        .help("Inline source text")
}

/// Text to classify (positional, required).
pub fn text_arg() -> Arg {
    Arg::new("text")
        .value_name("TEXT")
        .required(true)
        .help("Text to classify")
}

/// Record scope (--scope).
pub fn scope_arg() -> Arg {
    Arg::new("scope")
        .long("scope")
        .value_name("SCOPE")
        .value_parser(["all", "executed"])
        .help("Report every query-like literal, or only executor arguments [default: all]")
}

/// Skip the scanner after a successful parse (--no-safety-net).
pub fn no_safety_net_arg() -> Arg {
    Arg::new("no_safety_net")
        .long("no-safety-net")
        .action(ArgAction::SetTrue)
        .help("Trust the syntax tree; don't also run the line scanner")
}

/// Never build a syntax tree (--fallback-only).
pub fn fallback_only_arg() -> Arg {
    Arg::new("fallback_only")
        .long("fallback-only")
        .action(ArgAction::SetTrue)
        .help("Use only the line scanner")
}

/// Size limit override (--max-bytes).
pub fn max_bytes_arg() -> Arg {
    Arg::new("max_bytes")
        .long("max-bytes")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Largest document to analyze, in bytes")
}

/// Oversize policy override (--oversize).
pub fn oversize_arg() -> Arg {
    Arg::new("oversize")
        .long("oversize")
        .value_name("POLICY")
        .value_parser(["reject", "truncate"])
        .help("What to do with documents over the size limit")
}

/// JSON configuration file (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON configuration file; flags override its values")
}

/// Single-line JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// JSON verdict (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output the verdict as JSON")
}

/// Render diagnostics to stderr (--diagnostics).
pub fn diagnostics_arg() -> Arg {
    Arg::new("diagnostics")
        .long("diagnostics")
        .action(ArgAction::SetTrue)
        .help("Print warnings and errors to stderr")
}

/// Language flag (-l/--lang).
pub fn lang_arg() -> Arg {
    Arg::new("lang")
        .short('l')
        .long("lang")
        .value_name("LANG")
        .default_value("python")
        .help("Grammar to parse with")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Include anonymous nodes (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include anonymous nodes (literals, punctuation)")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}
