use crate::outcome::{ConversionResult, RunSummary};
use std::path::Path;

/// Trait for reporting conversion progress.
///
/// The CLI implements it with stdout lines and a spinner. All methods have
/// default no-op implementations.
pub trait ProgressReporter {
    fn on_run_start(&self, _source_root: &Path, _output_dir: Option<&Path>) {}
    fn on_output_dir_created(&self, _dir: &Path) {}
    fn on_file_start(&self, _source: &Path) {}
    fn on_file_complete(&self, _result: &ConversionResult) {}
    fn on_run_complete(&self, _summary: &RunSummary) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Plain-text report lines. Operator tooling scrapes these, so the wording
/// is fixed.
pub mod lines {
    use crate::error::ConvertError;
    use crate::outcome::{file_name_of, ConversionResult, Deletion, Outcome, RunSummary};
    use std::path::Path;

    pub fn source(root: &Path) -> String {
        format!("Source: {}", root.display())
    }

    pub fn target(output_dir: Option<&Path>) -> String {
        match output_dir {
            Some(dir) => format!("Target: {}", dir.display()),
            None => "Target: in place".to_string(),
        }
    }

    pub fn output_dir_created(dir: &Path) -> String {
        format!("Created output directory: {}", dir.display())
    }

    pub fn converting(source: &Path) -> String {
        format!("Converting {}...", file_name_of(source))
    }

    /// Lines describing one finished file, in print order.
    pub fn file_result(result: &ConversionResult) -> Vec<String> {
        let mut out = Vec::new();
        match &result.outcome {
            Outcome::Succeeded => out.push(format!("  -> Saved to {}", result.output_name())),
            Outcome::Skipped(reason) => {
                out.push(format!("Skipping ({}): {}", reason, result.source_name()))
            }
            Outcome::Failed(ConvertError::MissingOutput(_)) => out.push(format!(
                "  -> Error: WebP file was not created for {}",
                result.source_name()
            )),
            Outcome::Failed(err) => out.push(format!(
                "  -> Error converting {}: {}",
                result.source_name(),
                err
            )),
        }
        match &result.deletion {
            Deletion::NotRequested => {}
            Deletion::Deleted => {
                out.push(format!("  -> Deleted original: {}", result.source_name()))
            }
            Deletion::Failed(err) => out.push(format!(
                "  -> Failed to delete original {}: {}",
                result.source_name(),
                err
            )),
        }
        out
    }

    pub fn completed(summary: &RunSummary) -> String {
        format!("Completed! Converted {} images.", summary.converted)
    }
}

#[cfg(test)]
mod tests {
    use super::lines;
    use crate::error::ConvertError;
    use crate::outcome::{ConversionResult, Deletion, Outcome, RunSummary, SkipReason};
    use std::path::{Path, PathBuf};

    fn result(outcome: Outcome, deletion: Deletion) -> ConversionResult {
        ConversionResult {
            source: PathBuf::from("/src/cat1/broken.png"),
            output: PathBuf::from("/out/broken.webp"),
            outcome,
            deletion,
        }
    }

    #[test]
    fn test_start_and_success_lines() {
        assert_eq!(
            lines::converting(Path::new("/src/cat1/a.png")),
            "Converting a.png..."
        );
        let ok = result(Outcome::Succeeded, Deletion::NotRequested);
        assert_eq!(lines::file_result(&ok), vec!["  -> Saved to broken.webp"]);
    }

    #[test]
    fn test_failure_line_names_the_file() {
        let failed = result(
            Outcome::Failed(ConvertError::Encode("bad dimension".to_string())),
            Deletion::NotRequested,
        );
        let out = lines::file_result(&failed);
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("Error converting broken.png"));
        assert!(out[0].contains("bad dimension"));
    }

    #[test]
    fn test_missing_output_and_deletion_lines() {
        let missing = result(
            Outcome::Failed(ConvertError::MissingOutput(PathBuf::from("/out/broken.webp"))),
            Deletion::NotRequested,
        );
        assert_eq!(
            lines::file_result(&missing),
            vec!["  -> Error: WebP file was not created for broken.png"]
        );

        let deleted = result(Outcome::Succeeded, Deletion::Deleted);
        assert_eq!(
            lines::file_result(&deleted),
            vec![
                "  -> Saved to broken.webp",
                "  -> Deleted original: broken.png"
            ]
        );
    }

    #[test]
    fn test_skip_line() {
        let skipped = result(Outcome::Skipped(SkipReason::NotFound), Deletion::NotRequested);
        assert_eq!(
            lines::file_result(&skipped),
            vec!["Skipping (not found): broken.png"]
        );

        let clashed = result(
            Outcome::Skipped(SkipReason::OutputAlreadyWritten),
            Deletion::NotRequested,
        );
        assert_eq!(
            lines::file_result(&clashed),
            vec!["Skipping (output already written this run): broken.png"]
        );
    }

    #[test]
    fn test_completed_line() {
        let summary = RunSummary {
            converted: 2,
            ..RunSummary::default()
        };
        assert_eq!(lines::completed(&summary), "Completed! Converted 2 images.");
        assert_eq!(lines::target(None), "Target: in place");
    }
}
