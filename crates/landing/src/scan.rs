//! Candidate discovery in an upload's source directory

use crate::error::{LandingError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file waiting to be routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Final path component; this is what patterns are matched against
    pub file_name: String,
}

/// List regular files in `dir`, sorted by path. Only the top level is read
/// unless `recursive` is set.
pub fn scan_source(dir: &Path, recursive: bool) -> Result<Vec<Candidate>> {
    validate_source_dir(dir)?;

    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "Skipping file with non UTF-8 name");
            continue;
        };
        candidates.push(Candidate {
            file_name: file_name.to_string(),
            path: entry.into_path(),
        });
    }

    debug!(dir = %dir.display(), files = candidates.len(), "Scanned source directory");
    Ok(candidates)
}

fn validate_source_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(LandingError::SourceDir {
            path: dir.to_path_buf(),
            reason: "not found".to_string(),
        });
    }
    if !dir.is_dir() {
        return Err(LandingError::SourceDir {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}
