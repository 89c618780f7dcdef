use crate::error::Error;
use glob::Pattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

/// Check that `root` is a readable directory and return its absolute form.
pub fn open_root(root: &Path) -> Result<PathBuf, Error> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SourceRootMissing(root.to_path_buf()));
        }
        Err(err) => {
            return Err(Error::SourceRootUnreadable {
                path: root.to_path_buf(),
                source: err,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(Error::SourceRootNotDirectory(root.to_path_buf()));
    }

    fs::read_dir(root).map_err(|err| Error::SourceRootUnreadable {
        path: root.to_path_buf(),
        source: err,
    })?;

    fs::canonicalize(root).map_err(|err| Error::SourceRootUnreadable {
        path: root.to_path_buf(),
        source: err,
    })
}

/// Lazy, depth-first walk yielding every regular file under a root.
///
/// Entries are visited in file-name order. Symlinks are not followed.
/// Errors below the root are logged and skipped; an error on the root itself
/// is yielded once and ends the walk.
pub struct FileWalker {
    inner: walkdir::IntoIter,
    ignore_patterns: Vec<Pattern>,
    done: bool,
}

impl FileWalker {
    pub fn new(root: &Path, ignore_patterns: &[Pattern]) -> Result<Self, Error> {
        let root = open_root(root)?;
        Ok(Self {
            inner: WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter(),
            ignore_patterns: ignore_patterns.to_vec(),
            done: false,
        })
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
    }
}

impl Iterator for FileWalker {
    type Item = Result<PathBuf, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        self.done = true;
                        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                        let source = err
                            .into_io_error()
                            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk error"));
                        return Some(Err(Error::SourceRootUnreadable { path, source }));
                    }
                    match err.path() {
                        Some(path) => warn!("Error reading {}: {}", path.display(), err),
                        None => warn!("Error walking directory: {}", err),
                    }
                    continue;
                }
            };

            if entry.depth() > 0 && self.is_ignored(entry.path()) {
                trace!("Ignoring {}", entry.path().display());
                if entry.file_type().is_dir() {
                    self.inner.skip_current_dir();
                }
                continue;
            }

            if entry.file_type().is_file() {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn collect_names(walker: FileWalker) -> Vec<String> {
        walker
            .map(|p| {
                p.unwrap()
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn test_walk_recurses_into_subdirectories() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/deep")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("top.png"), b"x").unwrap();
        fs::write(root.join("a/deep/inner.jpg"), b"x").unwrap();
        fs::write(root.join("b/notes.txt"), b"x").unwrap();

        let mut names = collect_names(FileWalker::new(root, &[]).unwrap());
        names.sort();
        assert_eq!(names, vec!["inner.jpg", "notes.txt", "top.png"]);
    }

    #[test]
    fn test_walk_yields_absolute_paths() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.png"), b"x").unwrap();

        for path in FileWalker::new(tmp.path(), &[]).unwrap() {
            assert!(path.unwrap().is_absolute());
        }
    }

    #[test]
    fn test_walk_skips_ignored_directories() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("keep")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("keep/a.png"), b"x").unwrap();
        fs::write(root.join("node_modules/pkg/b.png"), b"x").unwrap();

        let patterns = vec![Pattern::new("*/node_modules").unwrap()];
        let names = collect_names(FileWalker::new(root, &patterns).unwrap());
        assert_eq!(names, vec!["a.png"]);
    }

    #[test]
    fn test_open_root_errors() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("missing");
        assert!(matches!(open_root(&missing), Err(Error::SourceRootMissing(_))));

        let file = tmp.path().join("file.png");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            open_root(&file),
            Err(Error::SourceRootNotDirectory(_))
        ));
    }
}
