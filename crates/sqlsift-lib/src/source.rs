use std::fs;
use std::path::Path;

use sqlsift_core::SourceDocument;

use crate::config::{Config, OversizePolicy};
use crate::{Error, Result};

/// Reads a document from disk.
///
/// Lines that are not valid UTF-8 are blanked, keeping their terminators,
/// so offsets and line numbers after them stay stable. Documents over the
/// size limit are refused here only under [`OversizePolicy::Reject`];
/// truncation happens in the engine.
pub fn load_document(path: &Path, config: &Config) -> Result<SourceDocument> {
    let io_error = |err: std::io::Error| Error::Io {
        path: path.to_owned(),
        message: err.to_string(),
    };

    let len = fs::metadata(path).map_err(io_error)?.len();
    let size = usize::try_from(len).unwrap_or(usize::MAX);
    let limit = config.document_limit();
    if size > limit && config.oversize == OversizePolicy::Reject {
        return Err(Error::DocumentTooLarge { size, limit });
    }

    let bytes = fs::read(path).map_err(io_error)?;
    Ok(SourceDocument::from_bytes_lossy(&bytes))
}
