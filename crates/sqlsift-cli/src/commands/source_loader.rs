use std::fs;
use std::io::{self, Read};
use std::path::Path;

use sqlsift_lib::SourceDocument;

/// Reads source text from `-s`, a file, or stdin (`-`).
pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<String, String> {
    match (text, path) {
        (Some(text), None) => Ok(text.to_owned()),
        (None, Some(path)) if is_stdin(path) => {
            read_document(io::stdin().lock()).map(|doc| doc.text().to_owned())
        }
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display())),
        (Some(_), Some(_)) => Err("cannot use both --source and positional SOURCE".to_owned()),
        (None, None) => Err("source required (positional or --source)".to_owned()),
    }
}

/// Reads all of `reader`, blanking lines that are not valid UTF-8.
pub fn read_document(mut reader: impl Read) -> Result<SourceDocument, String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(SourceDocument::from_bytes_lossy(&bytes))
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
