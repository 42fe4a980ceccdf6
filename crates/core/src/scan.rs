use crate::config::{RunConfig, PHOTO_EXTENSIONS};
use crate::error::RenameError;
use crate::renamer::{RenameResult, Renamer};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryReport {
    pub found: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<RenameResult>,
}

#[derive(Debug, Clone, Copy)]
pub enum DirectoryEvent<'a> {
    Found { total: usize },
    Processed(&'a RenameResult),
}

/// Renames every photo in `dir`, in path order, reporting progress through `on_event`.
///
/// Per-file failures end up in the report; only an unusable `dir` is an error.
pub fn rename_directory<F>(
    dir: &Path,
    config: &RunConfig,
    mut on_event: F,
) -> Result<DirectoryReport, RenameError>
where
    F: FnMut(DirectoryEvent<'_>),
{
    if !dir.is_dir() {
        return Err(RenameError::NotADirectory(dir.to_path_buf()));
    }

    let files = collect_photo_files(dir, config.recursive)?;
    let mut report = DirectoryReport {
        found: files.len(),
        ..DirectoryReport::default()
    };
    if files.is_empty() {
        log::debug!("No photo files found in {}", dir.display());
        return Ok(report);
    }

    on_event(DirectoryEvent::Found { total: files.len() });

    let mut renamer = Renamer::new(config.clone());
    for path in &files {
        let result = renamer.process(path);
        if result.success {
            report.successful += 1;
        } else {
            report.failed += 1;
        }
        on_event(DirectoryEvent::Processed(&result));
        report.results.push(result);
    }

    Ok(report)
}

pub fn collect_photo_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, RenameError> {
    let mut out = Vec::new();

    if recursive {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(RenameError::Scan {
                        path: root.to_path_buf(),
                        source: err.into(),
                    });
                }
                Err(err) => {
                    log::warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_photo(path) {
                out.push(path.to_path_buf());
            }
        }
    } else {
        let entries = fs::read_dir(root).map_err(|source| RenameError::Scan {
            path: root.to_path_buf(),
            source,
        })?;
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_photo(&path) {
                        out.push(path);
                    }
                }
                Err(err) => {
                    log::warn!("Skipping unreadable entry in {}: {}", root.display(), err);
                }
            }
        }
    }

    out.sort();
    Ok(out)
}

pub fn is_photo(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            PHOTO_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
