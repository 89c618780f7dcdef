use crate::job::OutputMode;
use std::path::{Path, PathBuf};

pub const WEBP_EXTENSION: &str = "webp";

/// Destination for `source` under `mode`, with the last extension replaced by
/// `.webp`.
///
/// Flat mode keeps only the file name, so `a/x.png` and `b/x.png` map to the
/// same output.
pub fn output_path(source: &Path, mode: &OutputMode) -> PathBuf {
    match mode {
        OutputMode::InPlace => source.with_extension(WEBP_EXTENSION),
        OutputMode::Flat(dir) => match source.file_name() {
            Some(name) => dir.join(Path::new(name).with_extension(WEBP_EXTENSION)),
            None => dir.join(source.with_extension(WEBP_EXTENSION)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_place_keeps_directory() {
        let out = output_path(Path::new("/site/public/cat1/a.png"), &OutputMode::InPlace);
        assert_eq!(out, PathBuf::from("/site/public/cat1/a.webp"));
    }

    #[test]
    fn test_flat_drops_subdirectories() {
        let mode = OutputMode::Flat(PathBuf::from("/out"));
        assert_eq!(
            output_path(Path::new("/src/cat2/b.jpg"), &mode),
            PathBuf::from("/out/b.webp")
        );
    }

    #[test]
    fn test_flat_same_basename_collides() {
        let mode = OutputMode::Flat(PathBuf::from("out"));
        assert_eq!(
            output_path(Path::new("src/a/x.png"), &mode),
            output_path(Path::new("src/b/x.png"), &mode)
        );
    }

    #[test]
    fn test_stem_case_preserved_and_only_last_extension_replaced() {
        assert_eq!(
            output_path(Path::new("Made In India.PNG"), &OutputMode::InPlace),
            PathBuf::from("Made In India.webp")
        );
        assert_eq!(
            output_path(Path::new("dir/archive.tar.jpeg"), &OutputMode::InPlace),
            PathBuf::from("dir/archive.tar.webp")
        );
    }

    #[test]
    fn test_name_without_stem_gets_suffix_appended() {
        assert_eq!(
            output_path(Path::new("icons/.png"), &OutputMode::InPlace),
            PathBuf::from("icons/.png.webp")
        );
    }
}
