use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::exit;

use tracing::{debug, warn};

use sqlsift_lib::{
    CandidateRecord, Config, Discovery, Engine, OversizePolicy, Scope, load_document,
};

use super::source_loader::{is_stdin, load_source, read_document};

/// Flag values that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub scope: Option<Scope>,
    pub structured: Option<bool>,
    pub safety_net: Option<bool>,
    pub max_document_bytes: Option<usize>,
    pub oversize: Option<OversizePolicy>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(scope) = self.scope {
            config = config.scope(scope);
        }
        if let Some(structured) = self.structured {
            config = config.structured(structured);
        }
        if let Some(safety_net) = self.safety_net {
            config = config.safety_net(safety_net);
        }
        if let Some(max) = self.max_document_bytes {
            config = config.max_document_bytes(max);
        }
        if let Some(oversize) = self.oversize {
            config = config.oversize(oversize);
        }
        config
    }
}

pub struct ScanArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub compact: bool,
    pub diagnostics: bool,
    pub color: bool,
}

pub fn run(args: ScanArgs) {
    let config = build_config(args.config_path.as_deref(), &args.overrides).unwrap_or_else(|msg| {
        eprintln!("error: {msg}");
        exit(1);
    });
    let engine = Engine::new(config);

    let (discovery, source, name) = discover(&engine, &args).unwrap_or_else(|msg| {
        eprintln!("error: {msg}");
        exit(1);
    });

    debug!(
        mode = ?discovery.mode,
        records = discovery.records.len(),
        diagnostics = discovery.diagnostics.len(),
        "scan finished"
    );

    match render_records(&discovery.records, args.compact) {
        Ok(json) => println!("{json}"),
        Err(msg) => {
            eprintln!("error: {msg}");
            exit(1);
        }
    }

    if args.diagnostics {
        eprint!(
            "{}",
            discovery
                .diagnostics
                .printer(&source)
                .path(&name)
                .colored(args.color)
                .render()
        );
    }

    if discovery.diagnostics.has_errors() {
        exit(1);
    }
}

/// Loads the JSON configuration file, if any, then applies flag overrides.
pub fn build_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config, String> {
    let base = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str::<Config>(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => Config::default(),
    };
    overrides.apply(base).validate().map_err(|e| e.to_string())
}

pub fn render_records(records: &[CandidateRecord], compact: bool) -> Result<String, String> {
    let json = if compact {
        serde_json::to_string(records)
    } else {
        serde_json::to_string_pretty(records)
    };
    json.map_err(|e| format!("cannot serialize records: {e}"))
}

/// Runs discovery and returns it with the text and name used for rendering.
pub fn discover(engine: &Engine, args: &ScanArgs) -> Result<(Discovery, String, String), String> {
    if args.source_text.is_none()
        && let Some(path) = args.source_path.as_deref()
        && !is_stdin(path)
    {
        let name = path.display().to_string();
        if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && sqlsift_langs::from_ext(ext).is_none()
        {
            warn!(path = %name, "not a Python file extension, scanning anyway");
        }
        return Ok(match load_document(path, engine.config()) {
            Ok(doc) => (engine.discover(&doc), doc.text().to_owned(), name),
            Err(err) => (Discovery::from_load_error(path, err), String::new(), name),
        });
    }

    if args.source_text.is_none() && args.source_path.as_deref().is_some_and(is_stdin) {
        let doc = read_document(io::stdin().lock())?;
        return Ok((engine.discover(&doc), doc.text().to_owned(), "<stdin>".to_owned()));
    }

    let source = load_source(args.source_path.as_deref(), args.source_text.as_deref())?;
    Ok((engine.discover_source(&source), source, "<source>".to_owned()))
}
