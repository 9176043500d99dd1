use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Resolve the directory Codex will work in.
///
/// The path is made absolute and must name an existing directory.
pub fn resolve_workspace(path: &Path) -> Result<PathBuf> {
    let resolved = std::fs::canonicalize(path)
        .map_err(|_| AppError::InvalidWorkspace(path.display().to_string()))?;

    if !resolved.is_dir() {
        return Err(AppError::InvalidWorkspace(resolved.display().to_string()));
    }

    Ok(resolved)
}
