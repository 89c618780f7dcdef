use crate::config::{AppConfig, MissingRootPolicy};
use crate::error::Error;
use crate::scanner::ExtensionFilter;
use glob::Pattern;
use std::path::PathBuf;

pub const MAX_QUALITY: u8 = 100;
pub const MAX_METHOD: u8 = 6;

/// Where converted files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Every output lands directly in this directory, subdirectories are dropped.
    Flat(PathBuf),
    /// Each output is written next to its source.
    InPlace,
}

/// Lossy WebP encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    pub quality: u8,
    pub method: u8,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            quality: crate::config::DEFAULT_QUALITY,
            method: crate::config::DEFAULT_METHOD,
        }
    }
}

/// A validated description of one conversion run.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub source_root: PathBuf,
    pub output_mode: OutputMode,
    pub encode: EncodeSettings,
    pub delete_source: bool,
    pub filter: ExtensionFilter,
    pub ignore_patterns: Vec<Pattern>,
    /// Names relative to `source_root`. When non-empty the root is not walked.
    pub files: Vec<PathBuf>,
    pub on_missing_root: MissingRootPolicy,
    pub atomic_write: bool,
}

impl ConversionJob {
    /// In-place job over `source_root` with default settings.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_mode: OutputMode::InPlace,
            encode: EncodeSettings::default(),
            delete_source: false,
            filter: ExtensionFilter::default(),
            ignore_patterns: Vec::new(),
            files: Vec::new(),
            on_missing_root: MissingRootPolicy::Abort,
            atomic_write: false,
        }
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    pub fn with_encode(mut self, encode: EncodeSettings) -> Self {
        self.encode = encode;
        self
    }

    pub fn with_delete_source(mut self, delete_source: bool) -> Self {
        self.delete_source = delete_source;
        self
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_missing_root_policy(mut self, policy: MissingRootPolicy) -> Self {
        self.on_missing_root = policy;
        self
    }

    pub fn with_atomic_write(mut self, atomic_write: bool) -> Self {
        self.atomic_write = atomic_write;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<Pattern>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        if config.quality > MAX_QUALITY {
            return Err(Error::InvalidConfig(format!(
                "quality must be between 0 and {}, got {}",
                MAX_QUALITY, config.quality
            )));
        }
        if config.method > MAX_METHOD {
            return Err(Error::InvalidConfig(format!(
                "method must be between 0 and {}, got {}",
                MAX_METHOD, config.method
            )));
        }

        let filter = ExtensionFilter::new(&config.extensions);
        if filter.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one file extension is required".to_string(),
            ));
        }

        let ignore_patterns = config
            .ignore_patterns
            .iter()
            .map(|glob| {
                Pattern::new(glob).map_err(|e| {
                    Error::InvalidConfig(format!("invalid glob pattern '{}': {}", glob, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let output_mode = match config.output_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => OutputMode::Flat(PathBuf::from(dir)),
            _ => OutputMode::InPlace,
        };

        Ok(Self {
            source_root: PathBuf::from(&config.source_root),
            output_mode,
            encode: EncodeSettings {
                quality: config.quality,
                method: config.method,
            },
            delete_source: config.delete_source,
            filter,
            ignore_patterns,
            files: config.files.iter().map(PathBuf::from).collect(),
            on_missing_root: config.on_missing_root,
            atomic_write: config.atomic_write,
        })
    }
}
