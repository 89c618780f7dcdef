pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod job;
pub mod mapper;
pub mod outcome;
pub mod progress;
pub mod scanner;

pub use crate::config::{AppConfig, MissingRootPolicy};
pub use crate::engine::ConvertEngine;
pub use crate::error::{ConvertError, Error};
pub use crate::job::{ConversionJob, EncodeSettings, OutputMode};
pub use crate::outcome::{ConversionResult, Deletion, Outcome, RunSummary, SkipReason};
pub use crate::progress::{ProgressReporter, SilentReporter};
