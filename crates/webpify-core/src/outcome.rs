use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Why a file was passed over without an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A listed file that does not exist under the source root.
    NotFound,
    /// Another file already produced this output in the current run.
    OutputAlreadyWritten,
    /// The output path is the source file itself.
    OutputIsSource,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "not found"),
            SkipReason::OutputAlreadyWritten => write!(f, "output already written this run"),
            SkipReason::OutputIsSource => write!(f, "output would overwrite source"),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Succeeded,
    Skipped(SkipReason),
    Failed(ConvertError),
}

/// What happened to the original after the conversion.
#[derive(Debug)]
pub enum Deletion {
    NotRequested,
    Deleted,
    Failed(ConvertError),
}

#[derive(Debug)]
pub struct ConversionResult {
    pub source: PathBuf,
    pub output: PathBuf,
    pub outcome: Outcome,
    pub deletion: Deletion,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded)
    }

    pub fn source_name(&self) -> String {
        file_name_of(&self.source)
    }

    pub fn output_name(&self) -> String {
        file_name_of(&self.output)
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Files whose output exists after the write.
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub deleted: usize,
    pub delete_failed: usize,
    /// Outputs written more than once in this run (flat mode basename clashes).
    pub collisions: usize,
    pub duration: Duration,
}

impl RunSummary {
    pub fn record(&mut self, result: &ConversionResult) {
        match result.outcome {
            Outcome::Succeeded => self.converted += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
        match result.deletion {
            Deletion::NotRequested => {}
            Deletion::Deleted => self.deleted += 1,
            Deletion::Failed(_) => self.delete_failed += 1,
        }
    }

    /// No conversion or deletion failed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.delete_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: Outcome, deletion: Deletion) -> ConversionResult {
        ConversionResult {
            source: PathBuf::from("src/a.png"),
            output: PathBuf::from("src/a.webp"),
            outcome,
            deletion,
        }
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let mut summary = RunSummary::default();
        summary.record(&result(Outcome::Succeeded, Deletion::Deleted));
        summary.record(&result(Outcome::Succeeded, Deletion::NotRequested));
        summary.record(&result(
            Outcome::Failed(ConvertError::MissingOutput(PathBuf::from("src/a.webp"))),
            Deletion::NotRequested,
        ));
        summary.record(&result(Outcome::Skipped(SkipReason::NotFound), Deletion::NotRequested));

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.deleted, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_delete_failure_makes_run_unclean() {
        let mut summary = RunSummary::default();
        summary.record(&result(
            Outcome::Succeeded,
            Deletion::Failed(ConvertError::Delete {
                path: PathBuf::from("src/a.png"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }),
        ));
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.delete_failed, 1);
        assert!(!summary.is_clean());
    }
}
