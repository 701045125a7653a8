//! Disk I/O helpers: load the document and write it back atomically.
//!
//! "Atomic" here means temp file + rename, which is as good as the
//! platform makes it: solid on most local file systems, best-effort on
//! FAT32 and network shares. Keep backups if the data matters.

use crate::error::{Error, Result};
use crate::serializer::JsonSerializer;
use crate::Document;
use std::path::Path;

/// Reads and parses the document at `path`. An empty file counts as an
/// empty document. A missing file is an error: the store creates the file
/// at construction and never deletes it, so absence means somebody else
/// removed it.
pub fn load(path: &Path, serializer: &JsonSerializer) -> Result<Document> {
    let bytes = std::fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(Document::new());
    }
    serializer.deserialize(&bytes)
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::Io(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::Io(e.to_string()))?;
    Ok(())
}
