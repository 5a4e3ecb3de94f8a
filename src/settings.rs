//! Program settings, read from `settings.toml` in the user's config directory.
//!
//! Every setting is optional and a missing file is treated the same as an empty one.
use crate::get_config_dir;
use crate::input::read_toml;
use crate::log::DEFAULT_LOG_LEVEL;
use anyhow::{Context, Result};
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

const DEFAULT_SETTINGS_FILE_HEADER: &str = "# Program settings for transmission
# Every setting below is at its default value. Remove the leading '#' to change one.
";

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE_NAME)
}

/// Program settings from config file
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The log level to use unless TRANSMISSION_LOG_LEVEL is set
    /// (one of off, error, warn, info, debug or trace)
    pub log_level: String,
    /// Whether to replace the contents of an existing output folder without
    /// needing the --overwrite option
    pub overwrite: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            overwrite: false,
        }
    }
}

impl Settings {
    /// Load settings from the user's config directory, falling back to defaults if there is no
    /// settings file
    pub fn load() -> Result<Self> {
        Self::load_from_path(&get_settings_file_path())
    }

    fn load_from_path(file_path: &Path) -> Result<Self> {
        if file_path.is_file() {
            read_toml(file_path)
        } else {
            Ok(Self::default())
        }
    }

    /// The contents of a settings file with every setting commented out, each preceded by its
    /// documentation
    pub fn default_file_contents() -> Result<String> {
        let defaults = toml::Value::try_from(Self::default())?;
        let defaults = defaults
            .as_table()
            .context("Settings must serialise to a TOML table")?;

        let mut out = DEFAULT_SETTINGS_FILE_HEADER.to_string();
        for (field, value) in defaults {
            out.push('\n');
            if let Ok(docs) = Self::get_field_docs(field) {
                for line in docs.lines() {
                    writeln!(out, "# # {}", line.trim())?;
                }
            }
            writeln!(out, "# {field} = {value}")?;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_settings_load_from_path_no_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);
        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_load_from_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&file_path, "overwrite = true\n").unwrap();

        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings {
                log_level: DEFAULT_LOG_LEVEL.to_string(),
                overwrite: true
            }
        );
    }

    #[test]
    fn test_settings_load_from_path_unknown_field() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&file_path, "colour = true\n").unwrap();
        assert!(Settings::load_from_path(&file_path).is_err());
    }

    #[test]
    fn test_default_file_contents() {
        let contents = Settings::default_file_contents().unwrap();
        assert!(contents.starts_with(DEFAULT_SETTINGS_FILE_HEADER));
        assert!(contents.contains("# log_level = \"info\""));
        assert!(contents.contains("# overwrite = false"));
        assert!(contents.contains("# # The log level to use unless TRANSMISSION_LOG_LEVEL is set"));

        // The file is valid TOML with everything commented out
        assert_eq!(
            toml::from_str::<Settings>(&contents).unwrap(),
            Settings::default()
        );

        // Uncommenting the settings gives the same values
        let uncommented: String = contents
            .lines()
            .filter(|line| !line.starts_with("# #") && line.contains('='))
            .filter_map(|line| line.strip_prefix("# "))
            .map(|line| format!("{line}\n"))
            .collect();
        assert_eq!(
            toml::from_str::<Settings>(&uncommented).unwrap(),
            Settings::default()
        );
    }
}
