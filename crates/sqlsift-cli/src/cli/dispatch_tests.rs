//! Tests for CLI dispatch logic: argument parsing and params extraction.

use std::path::PathBuf;

use sqlsift_lib::{OversizePolicy, Scope};

use super::*;
use crate::cli::commands::{classify_command, scan_command, tree_command};
use crate::commands::scan::ScanArgs;

#[test]
fn scan_positional_source() {
    let m = scan_command()
        .try_get_matches_from(["scan", "app.py"])
        .unwrap();
    let params = ScanParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("app.py")));
    assert_eq!(params.source_text, None);
    assert_eq!(params.color, ColorChoice::Auto);
    assert!(!params.compact);
}

#[test]
fn scan_inline_source() {
    let m = scan_command()
        .try_get_matches_from(["scan", "-s", "cur.execute('SELECT 1')"])
        .unwrap();
    let params = ScanParams::from_matches(&m);

    assert_eq!(params.source_path, None);
    assert_eq!(params.source_text.as_deref(), Some("cur.execute('SELECT 1')"));
}

#[test]
fn scan_rejects_both_sources() {
    let result = scan_command().try_get_matches_from(["scan", "app.py", "-s", "x = 1"]);
    assert!(result.is_err());
}

#[test]
fn scan_flags_become_overrides() {
    let m = scan_command()
        .try_get_matches_from([
            "scan",
            "app.py",
            "--scope",
            "executed",
            "--no-safety-net",
            "--max-bytes",
            "1024",
            "--oversize",
            "truncate",
            "--compact",
            "--diagnostics",
            "--color",
            "never",
        ])
        .unwrap();
    let args: ScanArgs = ScanParams::from_matches(&m).into();

    assert_eq!(args.overrides.scope, Some(Scope::Executed));
    assert_eq!(args.overrides.safety_net, Some(false));
    assert_eq!(args.overrides.structured, None);
    assert_eq!(args.overrides.max_document_bytes, Some(1024));
    assert_eq!(args.overrides.oversize, Some(OversizePolicy::Truncate));
    assert!(args.compact);
    assert!(args.diagnostics);
    assert!(!args.color);
}

#[test]
fn scan_without_flags_overrides_nothing() {
    let m = scan_command().try_get_matches_from(["scan", "app.py"]).unwrap();
    let args: ScanArgs = ScanParams::from_matches(&m).into();

    assert_eq!(args.overrides.scope, None);
    assert_eq!(args.overrides.safety_net, None);
    assert_eq!(args.overrides.max_document_bytes, None);
}

#[test]
fn scan_fallback_only() {
    let m = scan_command()
        .try_get_matches_from(["scan", "app.py", "--fallback-only"])
        .unwrap();
    let args: ScanArgs = ScanParams::from_matches(&m).into();

    assert_eq!(args.overrides.structured, Some(false));
}

#[test]
fn scan_rejects_unknown_scope() {
    let result = scan_command().try_get_matches_from(["scan", "app.py", "--scope", "some"]);
    assert!(result.is_err());
}

#[test]
fn scan_config_path() {
    let m = scan_command()
        .try_get_matches_from(["scan", "app.py", "--config", "sqlsift.json"])
        .unwrap();
    let params = ScanParams::from_matches(&m);

    assert_eq!(params.config, Some(PathBuf::from("sqlsift.json")));
}

#[test]
fn classify_requires_text() {
    assert!(classify_command().try_get_matches_from(["classify"]).is_err());

    let m = classify_command()
        .try_get_matches_from(["classify", "--json", "SELECT 1"])
        .unwrap();
    let params = ClassifyParams::from_matches(&m);

    assert_eq!(params.text, "SELECT 1");
    assert!(params.json);
}

#[test]
fn tree_flags() {
    let m = tree_command()
        .try_get_matches_from(["tree", "app.py", "--raw", "--spans"])
        .unwrap();
    let params = TreeParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("app.py")));
    assert_eq!(params.lang, "python");
    assert!(params.raw);
    assert!(params.spans);
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["sqlsift"]).is_err());
    assert!(build_cli().try_get_matches_from(["sqlsift", "langs"]).is_ok());
}

#[test]
fn scan_help_lists_config_flags() {
    let help = scan_command().render_help().to_string();

    assert!(help.contains("--scope"));
    assert!(help.contains("--no-safety-net"));
    assert!(help.contains("--config"));
}
