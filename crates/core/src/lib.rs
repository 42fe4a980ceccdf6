mod apply;
mod config;
mod error;
mod exif_reader;
mod metadata;
mod pattern;
mod planner;
mod renamer;
mod scan;

pub use config::{RunConfig, TransferMode, PHOTO_EXTENSIONS};
pub use error::RenameError;
pub use exif_reader::{extract_date, parse_exif_date, tag_name, DATE_FIELDS, EXIF_DATE_FORMAT};
pub use metadata::{AbsentReason, CaptureDate, DateLookup};
pub use pattern::{
    extension_with_dot, format_name, DatePattern, PatternError, DEFAULT_PATTERN,
};
pub use planner::{destination_dir, resolve_collision};
pub use renamer::{rename_photo, RenameResult, Renamer};
pub use scan::{collect_photo_files, is_photo, rename_directory, DirectoryEvent, DirectoryReport};

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
pub(crate) mod test_support;
