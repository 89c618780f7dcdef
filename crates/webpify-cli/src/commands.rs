use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use webpify_core::{AppConfig, MissingRootPolicy};

#[derive(Debug, Parser)]
#[command(name = "webpify")]
#[command(about = "Re-encode PNG/JPEG trees to WebP", long_about = None)]
pub struct Cli {
    /// Config file (defaults to an optional Webpify.* in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert images under the source root to WebP
    Convert(ConvertArgs),
    /// Print the resolved configuration
    PrintConfig(ConvertArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MissingRoot {
    Abort,
    Skip,
}

impl From<MissingRoot> for MissingRootPolicy {
    fn from(value: MissingRoot) -> Self {
        match value {
            MissingRoot::Abort => MissingRootPolicy::Abort,
            MissingRoot::Skip => MissingRootPolicy::Skip,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct ConvertArgs {
    /// Directory to scan
    #[arg(short, long)]
    pub source: Option<String>,

    /// Write every output flat into this directory
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<String>,

    /// Write each output next to its source
    #[arg(long)]
    pub in_place: bool,

    /// Lossy quality (0-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: Option<u8>,

    /// Compression effort (0-6)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub method: Option<u8>,

    /// Delete originals once their WebP output is confirmed on disk
    #[arg(long)]
    pub delete_source: bool,

    /// Convert only these files, relative to the source root
    #[arg(short = 'f', long = "file")]
    pub files: Vec<String>,

    /// Extension allow-list entry (replaces the default list)
    #[arg(short = 'e', long = "extension")]
    pub extensions: Vec<String>,

    /// Glob of paths to leave alone
    #[arg(long = "ignore")]
    pub ignore_patterns: Vec<String>,

    /// What to do when the source root does not exist
    #[arg(long, value_enum)]
    pub on_missing_root: Option<MissingRoot>,

    /// Write through a temp file and rename into place
    #[arg(long)]
    pub atomic_write: bool,

    /// Exit non-zero when any file fails
    #[arg(long)]
    pub strict: bool,
}

impl ConvertArgs {
    /// Flags win over file and environment settings.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(source) = &self.source {
            config.source_root = source.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = Some(output.clone());
        }
        if self.in_place {
            config.output_dir = None;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(method) = self.method {
            config.method = method;
        }
        if self.delete_source {
            config.delete_source = true;
        }
        if !self.files.is_empty() {
            config.files = self.files.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if !self.ignore_patterns.is_empty() {
            config.ignore_patterns = self.ignore_patterns.clone();
        }
        if let Some(policy) = self.on_missing_root {
            config.on_missing_root = policy.into();
        }
        if self.atomic_write {
            config.atomic_write = true;
        }
    }
}
