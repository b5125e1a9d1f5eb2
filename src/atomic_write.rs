use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::TickerError;

/// Directory that will hold the temp file: the target's parent, or `.` when
/// the path is a bare file name.
pub fn staging_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Writes `bytes` to a fresh temp file beside `path`, then renames it over
/// `path`. Readers see either the old or the new content. On any failure the
/// temp file is dropped (and removed) and `path` is left as it was.
pub fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), TickerError> {
    let dir = staging_dir(path);

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TickerError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| TickerError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| TickerError::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| TickerError::io(path, e.error))?;
    Ok(())
}
