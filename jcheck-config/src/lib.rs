use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "jcheck.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("char range '{start}'-'{end}' is empty")]
    EmptyCharRange { start: char, end: char },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Report char literals outside `char_range_start..=char_range_end`.
    pub check_char_range: bool,
    pub char_range_start: char,
    pub char_range_end: char,
    /// Report `s.name` calls on String variables when `name` is not a String method.
    pub check_string_methods: bool,
    /// Deduplicate literal text and memoize escape validation within a session.
    pub intern_literals: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_char_range: true,
            char_range_start: 'a',
            char_range_end: 'z',
            check_string_methods: true,
            intern_literals: true,
        }
    }
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        let defaults = Config::default();
        Self {
            check_char_range: raw_config
                .check_char_range
                .unwrap_or(defaults.check_char_range),
            char_range_start: raw_config
                .char_range_start
                .unwrap_or(defaults.char_range_start),
            char_range_end: raw_config.char_range_end.unwrap_or(defaults.char_range_end),
            check_string_methods: raw_config
                .check_string_methods
                .unwrap_or(defaults.check_string_methods),
            intern_literals: raw_config
                .intern_literals
                .unwrap_or(defaults.intern_literals),
        }
    }
}

impl From<&Config> for RawConfig {
    fn from(config: &Config) -> Self {
        Self {
            check_char_range: Some(config.check_char_range),
            char_range_start: Some(config.char_range_start),
            char_range_end: Some(config.char_range_end),
            check_string_methods: Some(config.check_string_methods),
            intern_literals: Some(config.intern_literals),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    check_char_range: Option<bool>,
    char_range_start: Option<char>,
    char_range_end: Option<char>,
    check_string_methods: Option<bool>,
    intern_literals: Option<bool>,
}

impl Config {
    /// Parses a configuration file body. Absent keys take their defaults.
    pub fn from_toml_str(config: &str) -> Result<Config, ConfigError> {
        let raw_config: RawConfig = toml::from_str(config)?;
        let config = Config::from(raw_config);

        if config.char_range_start > config.char_range_end {
            return Err(ConfigError::EmptyCharRange {
                start: config.char_range_start,
                end: config.char_range_end,
            });
        }

        Ok(config)
    }

    /// Reads `jcheck.toml` from `root_dir`, failing on unreadable or invalid files.
    pub fn from_dir<P: AsRef<Path>>(root_dir: P) -> Result<Config, ConfigError> {
        let path = root_dir.as_ref().join(CONFIG_FILE_NAME);
        let config = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        Config::from_toml_str(&config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&RawConfig::from(self))?)
    }
}

fn load_project_config<P: AsRef<Path>>(root_dir: P) -> Option<Config> {
    let config_path = root_dir.as_ref().join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return None;
    };

    let config = std::fs::read_to_string(config_path).ok()?;

    Config::from_toml_str(&config).ok()
}

/// Lenient loader: a missing or broken project file falls back to the defaults.
pub fn load_config<P: AsRef<Path>>(root_dir: Option<P>) -> Config {
    match root_dir {
        Some(root_dir) => load_project_config(root_dir).unwrap_or_default(),
        None => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str(
            r#"
check_char_range = false
char_range_end = "f"
"#,
        )
        .unwrap();

        assert!(!config.check_char_range);
        assert_eq!(config.char_range_start, 'a');
        assert_eq!(config.char_range_end, 'f');
        assert!(config.check_string_methods);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(
            Config::from_toml_str("colour = true"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = Config::from_toml_str("char_range_start = \"z\"\nchar_range_end = \"a\"");
        assert!(matches!(
            result,
            Err(ConfigError::EmptyCharRange { start: 'z', end: 'a' })
        ));
    }

    #[test]
    fn test_written_defaults_read_back() {
        let written = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml_str(&written).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_dir_falls_back_to_defaults() {
        let config = load_config(Some("/definitely/not/a/jcheck/project"));
        assert_eq!(config, Config::default());
        assert_eq!(load_config(None::<&str>), Config::default());
    }
}
