//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use sqlsift_lib::{OversizePolicy, Scope};

use super::ColorChoice;
use crate::commands::classify::ClassifyArgs;
use crate::commands::scan::{ConfigOverrides, ScanArgs};
use crate::commands::tree::TreeArgs;

pub struct ScanParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub config: Option<PathBuf>,
    pub scope: Option<String>,
    pub no_safety_net: bool,
    pub fallback_only: bool,
    pub max_bytes: Option<usize>,
    pub oversize: Option<String>,
    pub compact: bool,
    pub diagnostics: bool,
    pub color: ColorChoice,
}

impl ScanParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),

            // Engine configuration
            config: m.get_one::<PathBuf>("config").cloned(),
            scope: m.get_one::<String>("scope").cloned(),
            no_safety_net: m.get_flag("no_safety_net"),
            fallback_only: m.get_flag("fallback_only"),
            max_bytes: m.get_one::<usize>("max_bytes").copied(),
            oversize: m.get_one::<String>("oversize").cloned(),

            // Output
            compact: m.get_flag("compact"),
            diagnostics: m.get_flag("diagnostics"),
            color: parse_color(m),
        }
    }
}

impl From<ScanParams> for ScanArgs {
    fn from(p: ScanParams) -> Self {
        let scope = p.scope.as_deref().map(|s| match s {
            "executed" => Scope::Executed,
            _ => Scope::All,
        });
        let oversize = p.oversize.as_deref().map(|s| match s {
            "truncate" => OversizePolicy::Truncate,
            _ => OversizePolicy::Reject,
        });

        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            config_path: p.config,
            overrides: ConfigOverrides {
                scope,
                safety_net: p.no_safety_net.then_some(false),
                structured: p.fallback_only.then_some(false),
                max_document_bytes: p.max_bytes,
                oversize,
            },
            compact: p.compact,
            diagnostics: p.diagnostics,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ClassifyParams {
    pub text: String,
    pub json: bool,
}

impl ClassifyParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            text: m.get_one::<String>("text").cloned().unwrap_or_default(),
            json: m.get_flag("json"),
        }
    }
}

impl From<ClassifyParams> for ClassifyArgs {
    fn from(p: ClassifyParams) -> Self {
        Self {
            text: p.text,
            json: p.json,
        }
    }
}

pub struct TreeParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: String,
    pub raw: bool,
    pub spans: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m
                .get_one::<String>("lang")
                .cloned()
                .unwrap_or_else(|| "python".to_owned()),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            raw: p.raw,
            spans: p.spans,
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
