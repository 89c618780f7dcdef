use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_QUALITY: u8 = 85;
pub const DEFAULT_METHOD: u8 = 4;
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// What to do when the source root is not there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRootPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub source_root: String,
    /// Flat output directory. `None` writes each file next to its source.
    #[serde(default)]
    pub output_dir: Option<String>,
    pub quality: u8,
    pub method: u8,
    pub delete_source: bool,
    pub extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub files: Vec<String>,
    pub on_missing_root: MissingRootPolicy,
    pub atomic_write: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_root: ".".to_string(),
            output_dir: None,
            quality: DEFAULT_QUALITY,
            method: DEFAULT_METHOD,
            delete_source: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignore_patterns: Vec::new(),
            files: Vec::new(),
            on_missing_root: MissingRootPolicy::Abort,
            atomic_write: false,
        }
    }
}

/// Layered load: defaults, then `Webpify.*` in the working directory (or the
/// explicit `path`, which must exist), then `WEBPIFY_*` environment variables.
pub fn load_configuration(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file_source = match path {
        Some(path) => ConfigFile::from(path).required(true),
        None => ConfigFile::with_name("Webpify").required(false),
    };

    let builder = Config::builder()
        .set_default("source_root", ".")?
        .set_default("quality", DEFAULT_QUALITY as i64)?
        .set_default("method", DEFAULT_METHOD as i64)?
        .set_default("delete_source", false)?
        .set_default("extensions", DEFAULT_EXTENSIONS.to_vec())?
        .set_default("ignore_patterns", Vec::<String>::new())?
        .set_default("files", Vec::<String>::new())?
        .set_default("on_missing_root", "abort")?
        .set_default("atomic_write", false)?
        .add_source(file_source)
        .add_source(
            Environment::with_prefix("WEBPIFY")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("extensions")
                .with_list_parse_key("ignore_patterns")
                .with_list_parse_key("files"),
        )
        .build()?;

    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_builtin_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.source_root, ".");
        assert!(config.output_dir.is_none());
        assert_eq!(config.quality, 85);
        assert_eq!(config.method, 4);
        assert_eq!(config.extensions, vec!["png", "jpg", "jpeg"]);
        assert_eq!(config.on_missing_root, MissingRootPolicy::Abort);
    }

    #[test]
    fn test_load_configuration_from_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalogue.toml");
        fs::write(
            &path,
            r#"
source_root = "public/icons/catalogue"
output_dir = "public/icons/catalogue_webp"
quality = 90
method = 6
on_missing_root = "skip"
"#,
        )
        .unwrap();

        let config = load_configuration(Some(&path)).unwrap();
        assert_eq!(config.source_root, "public/icons/catalogue");
        assert_eq!(
            config.output_dir.as_deref(),
            Some("public/icons/catalogue_webp")
        );
        assert_eq!(config.quality, 90);
        assert_eq!(config.method, 6);
        assert_eq!(config.on_missing_root, MissingRootPolicy::Skip);
        // Untouched keys keep their defaults
        assert!(!config.delete_source);
        assert_eq!(config.extensions.len(), 3);
    }

    #[test]
    fn test_load_configuration_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_configuration(Some(&path)).is_err());
    }
}
