use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("No EXIF date found")]
    NoDateFound,
    #[error("Extension is not valid UTF-8: {}", .0.display())]
    NonUtf8Extension(PathBuf),
    #[error("Error: {source}")]
    CreateOutputDir {
        new_name: String,
        #[source]
        source: io::Error,
    },
    #[error("Error: {source}")]
    Transfer {
        new_name: String,
        #[source]
        source: io::Error,
    },
    #[error("Could not read directory {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenameError {
    /// Name already resolved when the failure happened, if any.
    pub fn new_name(&self) -> Option<&str> {
        match self {
            RenameError::CreateOutputDir { new_name, .. }
            | RenameError::Transfer { new_name, .. } => Some(new_name),
            _ => None,
        }
    }
}
