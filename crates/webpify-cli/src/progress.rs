use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use webpify_core::progress::lines;
use webpify_core::{ConversionResult, ProgressReporter, RunSummary};

/// CLI progress reporter.
///
/// Report lines go to stdout in the fixed text shape; a spinner on stderr
/// shows the running count and is suspended around every print.
pub struct CliReporter {
    bar: ProgressBar,
}

impl CliReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        Self { bar }
    }

    fn print(&self, line: &str) {
        self.bar.suspend(|| println!("{}", line));
    }
}

impl ProgressReporter for CliReporter {
    fn on_run_start(&self, source_root: &Path, output_dir: Option<&Path>) {
        self.print(&lines::source(source_root));
        self.print(&lines::target(output_dir));
        self.bar.set_message("Scanning...");
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_output_dir_created(&self, dir: &Path) {
        self.print(&lines::output_dir_created(dir));
    }

    fn on_file_start(&self, source: &Path) {
        self.print(&lines::converting(source));
    }

    fn on_file_complete(&self, result: &ConversionResult) {
        for line in lines::file_result(result) {
            self.print(&line);
        }
        if result.is_success() {
            self.bar.inc(1);
        }
        self.bar
            .set_message(format!("Converted {} images", self.bar.position()));
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        self.bar.finish_and_clear();
        println!();
        println!("{}", lines::completed(summary));
    }
}
