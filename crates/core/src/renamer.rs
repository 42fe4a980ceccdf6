use crate::apply::transfer;
use crate::config::{RunConfig, TransferMode};
use crate::error::RenameError;
use crate::exif_reader::extract_date;
use crate::metadata::CaptureDate;
use crate::pattern::{extension_with_dot, format_name};
use crate::planner::{destination_dir, is_same_path, resolve_collision, Reservations};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome for one file. Built once and never changed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenameResult {
    pub success: bool,
    pub source_path: PathBuf,
    pub original_name: String,
    pub new_name: Option<String>,
    pub message: String,
    pub captured_at: Option<CaptureDate>,
}

/// Renames files one at a time under a fixed configuration.
///
/// Targets handed out and sources moved away are remembered, so a dry run over
/// several files resolves collisions the same way a real run would.
#[derive(Debug)]
pub struct Renamer {
    config: RunConfig,
    reservations: Reservations,
}

impl Renamer {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            reservations: Reservations::default(),
        }
    }

    pub fn process(&mut self, path: &Path) -> RenameResult {
        let original_name = path
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let date = match check_source(path) {
            Ok(date) => date,
            Err(err) => return failure(path, original_name, None, err),
        };

        match self.place(path, &date) {
            Ok((new_name, message)) => RenameResult {
                success: true,
                source_path: path.to_path_buf(),
                original_name,
                new_name: Some(new_name),
                message,
                captured_at: Some(date),
            },
            Err(err) => failure(path, original_name, Some(date), err),
        }
    }

    fn place(&mut self, path: &Path, date: &CaptureDate) -> Result<(String, String), RenameError> {
        let extension = extension_with_dot(path)
            .ok_or_else(|| RenameError::NonUtf8Extension(path.to_path_buf()))?;
        let candidate_name = format_name(date, &extension, &self.config.pattern);

        if let Some(output_dir) = &self.config.output_dir {
            if !self.config.dry_run {
                fs::create_dir_all(output_dir).map_err(|source| {
                    RenameError::CreateOutputDir {
                        new_name: candidate_name.clone(),
                        source,
                    }
                })?;
            }
        }

        let dir = destination_dir(path, self.config.output_dir.as_deref());
        let target = resolve_collision(
            path,
            &dir,
            &candidate_name,
            &extension,
            &self.reservations,
        );
        let new_name = target
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or(candidate_name);

        let mode = self.config.mode;
        if is_same_path(path, &target) {
            log::debug!("{} already carries its target name", path.display());
            self.reservations.claim(target);
            return Ok((new_name.clone(), format!("Already named {}", new_name)));
        }

        let message = if self.config.dry_run {
            log::debug!("dry run: {} -> {}", path.display(), target.display());
            format!("Would {} to {}", mode.verb(), new_name)
        } else {
            transfer(path, &target, mode).map_err(|source| RenameError::Transfer {
                new_name: new_name.clone(),
                source,
            })?;
            log::debug!("{} -> {}", path.display(), target.display());
            format!("{} to {}", mode.past_tense(), new_name)
        };

        if mode == TransferMode::Move {
            self.reservations.release(path.to_path_buf());
        }
        self.reservations.claim(target);
        Ok((new_name, message))
    }
}

/// Processes a single file with a fresh [`Renamer`].
pub fn rename_photo(path: &Path, config: &RunConfig) -> RenameResult {
    Renamer::new(config.clone()).process(path)
}

fn check_source(path: &Path) -> Result<CaptureDate, RenameError> {
    if !path.exists() {
        return Err(RenameError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(RenameError::NotAFile(path.to_path_buf()));
    }
    extract_date(path).date().ok_or(RenameError::NoDateFound)
}

fn failure(
    path: &Path,
    original_name: String,
    captured_at: Option<CaptureDate>,
    err: RenameError,
) -> RenameResult {
    log::debug!("{}: {}", path.display(), err);
    RenameResult {
        success: false,
        source_path: path.to_path_buf(),
        original_name,
        new_name: err.new_name().map(str::to_string),
        message: err.to_string(),
        captured_at,
    }
}
