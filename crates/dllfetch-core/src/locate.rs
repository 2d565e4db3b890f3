//! Filesystem search for library files.
//!
//! Finding candidates is kept separate from choosing between them: this
//! module only reports every match, [`crate::choose`] picks one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::name::LibName;

/// A file on disk whose name matches a library, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name exactly as found on disk.
    pub file_name: String,
    /// Directory containing the file.
    pub dir: PathBuf,
}

impl Candidate {
    #[must_use]
    pub fn new(file_name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            dir: dir.into(),
        }
    }

    /// Full path of the candidate file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Source of candidate files for a library name.
pub trait Locator {
    /// Return every match for `name` below `roots`, in discovery order.
    fn find(&self, name: &LibName, roots: &[PathBuf]) -> Vec<Candidate>;
}

/// Locator backed by a recursive directory walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLocator;

impl Locator for FsLocator {
    fn find(&self, name: &LibName, roots: &[PathBuf]) -> Vec<Candidate> {
        find_candidates(name, roots)
    }
}

/// Walk every root and collect all regular files named `name`, ignoring case.
///
/// Roots are walked in the given order and entries within a directory are
/// visited sorted by file name, so the result is deterministic for a fixed
/// filesystem. A symlink to a file is a candidate under the link's own name;
/// symlinked directories are not walked. Unreadable entries are skipped.
/// A file reachable from overlapping roots is reported once.
#[must_use]
pub fn find_candidates(name: &LibName, roots: &[PathBuf]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    for root in roots {
        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(root = %root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            // Symlinks to files count; symlinked directories are not descended.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if !name.matches(file_name) {
                continue;
            }

            if !seen.insert(entry.path().to_path_buf()) {
                continue;
            }

            let dir = entry.path().parent().unwrap_or(Path::new("")).to_path_buf();
            candidates.push(Candidate::new(file_name, dir));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"MZ").unwrap();
    }

    #[test]
    fn test_finds_nested_file_ignoring_case() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a").join("b").join("ZLIB1.DLL"));

        let found = find_candidates(&LibName::new("zlib1.dll"), &[dir.path().to_path_buf()]);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name, "ZLIB1.DLL");
        assert_eq!(found[0].dir, dir.path().join("a").join("b"));
        assert_eq!(found[0].path(), dir.path().join("a").join("b").join("ZLIB1.DLL"));
    }

    #[test]
    fn test_no_match_returns_empty() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("other.dll"));
        touch(&dir.path().join("zlib1.dll.bak"));

        let found = find_candidates(&LibName::new("zlib1.dll"), &[dir.path().to_path_buf()]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_directories_are_not_candidates() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("foo.dll")).unwrap();

        let found = find_candidates(&LibName::new("foo.dll"), &[dir.path().to_path_buf()]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_collects_matches_across_roots_in_root_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(&first.path().join("x.dll"));
        touch(&second.path().join("sub").join("X.dll"));

        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = find_candidates(&LibName::new("x.dll"), &roots);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].path(), first.path().join("x.dll"));
        assert_eq!(found[1].path(), second.path().join("sub").join("X.dll"));
    }

    #[test]
    fn test_overlapping_roots_report_file_once() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("lib").join("x.dll"));

        let roots = vec![dir.path().to_path_buf(), dir.path().join("lib")];
        let found = find_candidates(&LibName::new("x.dll"), &roots);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("x.dll"));

        let roots = vec![dir.path().join("does-not-exist"), dir.path().to_path_buf()];
        let found = find_candidates(&LibName::new("x.dll"), &roots);
        assert_eq!(found.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_a_candidate() {
        let store = tempdir().unwrap();
        let real = store.path().join("zlib1.dll.real");
        touch(&real);

        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("zlib1.dll")).unwrap();

        let found = find_candidates(&LibName::new("zlib1.dll"), &[dir.path().to_path_buf()]);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path(), dir.path().join("zlib1.dll"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_walked() {
        let store = tempdir().unwrap();
        touch(&store.path().join("x.dll"));
        fs::create_dir_all(store.path().join("y.dll")).unwrap();

        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(store.path(), dir.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(store.path().join("y.dll"), dir.path().join("y.dll")).unwrap();

        let roots = [dir.path().to_path_buf()];
        assert!(find_candidates(&LibName::new("x.dll"), &roots).is_empty());
        assert!(find_candidates(&LibName::new("y.dll"), &roots).is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_case_variants_in_same_directory_are_distinct() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.dll"));
        touch(&dir.path().join("A.DLL"));

        let found = find_candidates(&LibName::new("a.dll"), &[dir.path().to_path_buf()]);
        assert_eq!(found.len(), 2);
    }
}
