use crate::config::MissingRootPolicy;
use crate::converter::{self, WriteMode};
use crate::error::{ConvertError, Error};
use crate::job::{ConversionJob, OutputMode};
use crate::mapper;
use crate::outcome::{ConversionResult, Deletion, Outcome, RunSummary, SkipReason};
use crate::progress::ProgressReporter;
use crate::scanner::{self, FileWalker};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

pub struct ConvertEngine {
    job: ConversionJob,
}

/// One unit of work handed to the per-file step.
enum Candidate {
    Found(PathBuf),
    Missing(PathBuf),
}

impl ConvertEngine {
    pub fn new(job: ConversionJob) -> Self {
        Self { job }
    }

    pub fn job(&self) -> &ConversionJob {
        &self.job
    }

    /// Run the conversion pipeline:
    /// 1. Resolve the source root (missing-root policy applies)
    /// 2. Walk it lazily, or resolve the explicit file list
    /// 3. Convert each matching file, verify the output, optionally delete the source
    ///
    /// Only root-level failures are returned as errors; per-file failures end
    /// up in the summary.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunSummary, Error> {
        let start = Instant::now();
        let output_dir = match &self.job.output_mode {
            OutputMode::Flat(dir) => Some(dir.as_path()),
            OutputMode::InPlace => None,
        };
        reporter.on_run_start(&self.job.source_root, output_dir);

        let root = match scanner::open_root(&self.job.source_root) {
            Ok(root) => root,
            Err(Error::SourceRootMissing(path))
                if self.job.on_missing_root == MissingRootPolicy::Skip =>
            {
                warn!("Source root {} does not exist, nothing to do", path.display());
                let summary = RunSummary {
                    duration: start.elapsed(),
                    ..RunSummary::default()
                };
                reporter.on_run_complete(&summary);
                return Ok(summary);
            }
            Err(err) => return Err(err),
        };
        info!("Scanning {}", root.display());

        if let Some(dir) = output_dir {
            if ensure_output_dir(dir)? {
                reporter.on_output_dir_created(dir);
            }
        }

        let mut summary = RunSummary::default();
        let mut written: HashSet<PathBuf> = HashSet::new();

        for candidate in self.candidates(&root)? {
            let result = match candidate? {
                Candidate::Missing(source) => ConversionResult {
                    output: mapper::output_path(&source, &self.job.output_mode),
                    source,
                    outcome: Outcome::Skipped(SkipReason::NotFound),
                    deletion: Deletion::NotRequested,
                },
                Candidate::Found(source) => {
                    let output = mapper::output_path(&source, &self.job.output_mode);
                    match self.guard_output(&source, &output, &written) {
                        Some(reason) => {
                            if reason == SkipReason::OutputAlreadyWritten {
                                summary.collisions += 1;
                            }
                            ConversionResult {
                                source,
                                output,
                                outcome: Outcome::Skipped(reason),
                                deletion: Deletion::NotRequested,
                            }
                        }
                        None => {
                            reporter.on_file_start(&source);
                            self.process_file(source, output)
                        }
                    }
                }
            };

            if result.is_success() && !written.insert(result.output.clone()) {
                warn!(
                    "{} was already written in this run; {} overwrote it",
                    result.output.display(),
                    result.source.display()
                );
                summary.collisions += 1;
            }

            summary.record(&result);
            reporter.on_file_complete(&result);
        }

        summary.duration = start.elapsed();
        debug!(
            "Run completed in {:.2}s: {} converted, {} failed, {} skipped",
            summary.duration.as_secs_f64(),
            summary.converted,
            summary.failed,
            summary.skipped,
        );
        reporter.on_run_complete(&summary);
        Ok(summary)
    }

    fn candidates<'a>(
        &'a self,
        root: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<Candidate, Error>> + 'a>, Error> {
        if !self.job.files.is_empty() {
            let root = root.to_path_buf();
            return Ok(Box::new(self.job.files.iter().map(move |name| {
                let path = root.join(name);
                if path.is_file() {
                    Ok(Candidate::Found(path))
                } else {
                    Ok(Candidate::Missing(path))
                }
            })));
        }

        let walker = FileWalker::new(root, &self.job.ignore_patterns)?;
        let filter = &self.job.filter;
        Ok(Box::new(walker.filter_map(move |entry| match entry {
            Ok(path) if filter.matches(&path) => Some(Ok(Candidate::Found(path))),
            Ok(path) => {
                trace!("Skipping {}", path.display());
                None
            }
            Err(err) => Some(Err(err)),
        })))
    }

    /// Reasons not to touch `source` at all. An output that resolves to the
    /// source is never written, and with `delete_source` on an output already
    /// produced this run is never overwritten.
    fn guard_output(
        &self,
        source: &Path,
        output: &Path,
        written: &HashSet<PathBuf>,
    ) -> Option<SkipReason> {
        if is_same_file(source, output) {
            warn!(
                "{} would be overwritten by its own output, leaving it alone",
                source.display()
            );
            return Some(SkipReason::OutputIsSource);
        }
        if self.job.delete_source && written.contains(output) {
            warn!(
                "{} was already written in this run; keeping {}",
                output.display(),
                source.display()
            );
            return Some(SkipReason::OutputAlreadyWritten);
        }
        None
    }

    /// Convert one file. Never fails; errors are folded into the result.
    fn process_file(&self, source: PathBuf, output: PathBuf) -> ConversionResult {
        let write_mode = if self.job.atomic_write {
            WriteMode::Atomic
        } else {
            WriteMode::Direct
        };

        let converted =
            converter::convert_to_webp(&source, &output, &self.job.encode, write_mode);
        let outcome = match converted {
            // The output existing on disk is the success signal
            Ok(written) if written.is_file() => Outcome::Succeeded,
            Ok(written) => Outcome::Failed(ConvertError::MissingOutput(written)),
            Err(err) => {
                debug!("Conversion of {} failed: {}", source.display(), err);
                Outcome::Failed(err)
            }
        };

        let deletion = match outcome {
            Outcome::Succeeded if self.job.delete_source => delete_source(&source),
            _ => Deletion::NotRequested,
        };

        ConversionResult {
            source,
            output,
            outcome,
            deletion,
        }
    }
}

fn is_same_file(source: &Path, output: &Path) -> bool {
    if source == output {
        return true;
    }
    match (fs::canonicalize(source), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Returns true when the directory had to be created.
fn ensure_output_dir(dir: &Path) -> Result<bool, Error> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|source| Error::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    info!("Created output directory {}", dir.display());
    Ok(true)
}

fn delete_source(source: &Path) -> Deletion {
    match fs::remove_file(source) {
        Ok(()) => {
            debug!("Deleted {}", source.display());
            Deletion::Deleted
        }
        Err(err) => {
            warn!("Unable to delete {}: {}", source.display(), err);
            Deletion::Failed(ConvertError::Delete {
                path: source.to_path_buf(),
                source: err,
            })
        }
    }
}
