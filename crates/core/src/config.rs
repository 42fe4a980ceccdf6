use crate::pattern::DatePattern;
use serde::Serialize;
use std::path::PathBuf;

/// Extensions picked up by directory runs, compared case-insensitively.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    #[default]
    Move,
    Copy,
}

impl TransferMode {
    pub fn from_copy_flag(copy: bool) -> Self {
        if copy {
            TransferMode::Copy
        } else {
            TransferMode::Move
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            TransferMode::Move => "Renamed",
            TransferMode::Copy => "Copied",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            TransferMode::Move => "rename",
            TransferMode::Copy => "copy",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Files stay next to their source when unset.
    pub output_dir: Option<PathBuf>,
    pub pattern: DatePattern,
    pub mode: TransferMode,
    pub recursive: bool,
    pub dry_run: bool,
}
