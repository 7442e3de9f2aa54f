use std::io::Write;
use std::path::Path;

use crate::error::{SummaryError, SummaryResult};

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// The temporary file is renamed over `path` only after it has been fully written and synced.
/// On any error it is removed (on drop), so `path` never holds a partial report.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> SummaryResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".summary-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| SummaryError::write(path, e))?;

    tmp.write_all(bytes).map_err(|e| SummaryError::write(path, e))?;
    tmp.as_file().sync_all().map_err(|e| SummaryError::write(path, e))?;
    tmp.persist(path).map_err(|e| SummaryError::write(path, e.error))?;
    Ok(())
}
