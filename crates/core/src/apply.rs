use crate::config::TransferMode;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::Path;

/// Moves or copies `source` to `target`. Callers resolve collisions first.
pub fn transfer(source: &Path, target: &Path, mode: TransferMode) -> io::Result<()> {
    match mode {
        TransferMode::Move => move_file(source, target),
        TransferMode::Copy => copy_file(source, target),
    }
}

fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    if source == target {
        return Ok(());
    }
    fs::rename(source, target)
}

// The target is created exclusively so an existing file is never truncated.
// A failure midway leaves the partial target behind.
fn copy_file(source: &Path, target: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;
    let metadata = reader.metadata()?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;
    io::copy(&mut reader, &mut writer)?;

    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    writer.set_times(times)?;
    writer.set_permissions(metadata.permissions())?;
    Ok(())
}
