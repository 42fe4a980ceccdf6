use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub fn destination_dir(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
}

/// Paths handed out or given up earlier in the same run.
///
/// A dry run leaves the disk alone: targets it hands out are not on disk yet, and
/// sources it would move away still are.
#[derive(Debug, Default)]
pub struct Reservations {
    claimed: HashSet<PathBuf>,
    released: HashSet<PathBuf>,
}

impl Reservations {
    pub fn claim(&mut self, target: PathBuf) {
        self.released.remove(&target);
        self.claimed.insert(target);
    }

    pub fn release(&mut self, source: PathBuf) {
        if !self.claimed.contains(&source) {
            self.released.insert(source);
        }
    }
}

/// Picks `dir/candidate_name`, or the first free `<base>_<n><ext>` for n = 1, 2, ...
///
/// The source's own path always counts as free, so a file that already carries its
/// target name resolves to itself.
pub fn resolve_collision(
    source: &Path,
    dir: &Path,
    candidate_name: &str,
    extension: &str,
    reservations: &Reservations,
) -> PathBuf {
    let candidate = dir.join(candidate_name);
    if is_available(&candidate, source, reservations) {
        return candidate;
    }

    let base = candidate_name
        .strip_suffix(extension)
        .unwrap_or(candidate_name);
    let mut n = 1usize;
    loop {
        let candidate = dir.join(format!("{}_{}{}", base, n, extension));
        if is_available(&candidate, source, reservations) {
            log::debug!(
                "{} is taken, using {}",
                candidate_name,
                candidate.display()
            );
            return candidate;
        }
        n += 1;
    }
}

fn is_available(candidate: &Path, source: &Path, reservations: &Reservations) -> bool {
    if reservations.claimed.contains(candidate) {
        return false;
    }
    if is_same_path(candidate, source) || reservations.released.contains(candidate) {
        return true;
    }
    // Dangling symlinks count as occupied; a rename would replace them.
    fs::symlink_metadata(candidate).is_err()
}

pub fn is_same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn destination_defaults_to_source_parent() {
        let source = PathBuf::from("/photos/2023/IMG_0001.jpg");
        assert_eq!(
            destination_dir(&source, None),
            PathBuf::from("/photos/2023")
        );
        assert_eq!(
            destination_dir(&source, Some(Path::new("/sorted"))),
            PathBuf::from("/sorted")
        );
    }

    #[test]
    fn free_candidate_is_used_as_is() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("IMG_0001.jpg");
        fs::write(&source, b"x").expect("write source");

        let target = resolve_collision(
            &source,
            temp.path(),
            "20230615_143000.jpg",
            ".jpg",
            &Reservations::default(),
        );
        assert_eq!(target, temp.path().join("20230615_143000.jpg"));
    }

    #[test]
    fn collisions_take_first_free_suffix_in_order() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("IMG_0001.jpg");
        fs::write(&source, b"x").expect("write source");
        for name in [
            "20230615_143000.jpg",
            "20230615_143000_1.jpg",
            "20230615_143000_2.jpg",
        ] {
            fs::write(temp.path().join(name), b"taken").expect("write existing");
        }

        let target = resolve_collision(
            &source,
            temp.path(),
            "20230615_143000.jpg",
            ".jpg",
            &Reservations::default(),
        );
        assert_eq!(target, temp.path().join("20230615_143000_3.jpg"));
    }

    #[test]
    fn claimed_targets_are_skipped() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("IMG_0001.jpg");
        let mut reservations = Reservations::default();
        reservations.claim(temp.path().join("20230615_143000.jpg"));

        let target = resolve_collision(
            &source,
            temp.path(),
            "20230615_143000.jpg",
            ".jpg",
            &reservations,
        );
        assert_eq!(target, temp.path().join("20230615_143000_1.jpg"));
    }

    #[test]
    fn source_is_its_own_free_target() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("20230615_143000.jpg");
        fs::write(&source, b"x").expect("write source");

        let target = resolve_collision(
            &source,
            temp.path(),
            "20230615_143000.jpg",
            ".jpg",
            &Reservations::default(),
        );
        assert_eq!(target, source);
    }

    #[test]
    fn suffixed_source_keeps_its_name() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("20230615_143000.jpg"), b"other").expect("write other");
        let source = temp.path().join("20230615_143000_1.jpg");
        fs::write(&source, b"x").expect("write source");

        let target = resolve_collision(
            &source,
            temp.path(),
            "20230615_143000.jpg",
            ".jpg",
            &Reservations::default(),
        );
        assert_eq!(target, source);
    }

    #[test]
    fn released_sources_free_their_names() {
        let temp = tempdir().expect("tempdir");
        let moved_away = temp.path().join("20230615_143000.jpg");
        fs::write(&moved_away, b"other").expect("write other");
        let source = temp.path().join("a.jpg");

        let mut reservations = Reservations::default();
        reservations.release(moved_away.clone());

        let target = resolve_collision(
            &source,
            temp.path(),
            "20230615_143000.jpg",
            ".jpg",
            &reservations,
        );
        assert_eq!(target, moved_away);

        reservations.claim(moved_away.clone());
        let target = resolve_collision(
            &source,
            temp.path(),
            "20230615_143000.jpg",
            ".jpg",
            &reservations,
        );
        assert_eq!(target, temp.path().join("20230615_143000_1.jpg"));
    }

    #[test]
    fn suffix_goes_before_extension_for_dotted_patterns() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("IMG_0001.jpg");
        fs::write(temp.path().join("2023.06.15.jpg"), b"taken").expect("write existing");

        let target = resolve_collision(
            &source,
            temp.path(),
            "2023.06.15.jpg",
            ".jpg",
            &Reservations::default(),
        );
        assert_eq!(target, temp.path().join("2023.06.15_1.jpg"));
    }
}
