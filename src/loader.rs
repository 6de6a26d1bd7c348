use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Read every regular file directly inside `dir`.
///
/// Returns file name -> contents. Subdirectories are skipped; a file that
/// cannot be read as UTF-8 text fails the whole load.
pub fn load_files<P: AsRef<Path>>(dir: P) -> Result<BTreeMap<String, String>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read corpus directory {}", dir.display()))?;

    let mut files = BTreeMap::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();

        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.insert(name, content);
    }

    tracing::info!(dir = %dir.display(), files = files.len(), "loaded corpus");
    Ok(files)
}
