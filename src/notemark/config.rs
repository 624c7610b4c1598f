use crate::error::Result;
use crate::model::DEFAULT_GROUPING;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".txt";

/// Configuration stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotemarkConfig {
    /// Extension for entry content files (e.g. ".txt", ".md")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Grouping label given to entries created without one
    #[serde(default = "default_grouping")]
    pub default_grouping: String,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_grouping() -> String {
    DEFAULT_GROUPING.to_string()
}

impl Default for NotemarkConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            default_grouping: default_grouping(),
        }
    }
}

/// Keys accepted by `config get/set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    FileExt,
    DefaultGrouping,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::FileExt, ConfigKey::DefaultGrouping];

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::FileExt => "file-ext",
            ConfigKey::DefaultGrouping => "default-grouping",
        }
    }

    pub fn from_name(name: &str) -> Option<ConfigKey> {
        ConfigKey::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl NotemarkConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::FileExt => &self.file_ext,
            ConfigKey::DefaultGrouping => &self.default_grouping,
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) {
        match key {
            ConfigKey::FileExt => self.set_file_ext(value),
            ConfigKey::DefaultGrouping => self.default_grouping = value.trim().to_string(),
        }
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NotemarkConfig::default();
        assert_eq!(config.file_ext, ".txt");
        assert_eq!(config.default_grouping, "General");
    }

    #[test]
    fn set_file_ext_normalizes_dot() {
        let mut config = NotemarkConfig::default();
        config.set(ConfigKey::FileExt, "md");
        assert_eq!(config.get(ConfigKey::FileExt), ".md");
        config.set(ConfigKey::FileExt, ".rs");
        assert_eq!(config.file_ext, ".rs");
    }

    #[test]
    fn key_names_round_trip() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_name(key.name()), Some(key));
        }
        assert_eq!(ConfigKey::from_name("colour"), None);
    }

    #[test]
    fn load_missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotemarkConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, NotemarkConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = NotemarkConfig::default();
        config.set(ConfigKey::DefaultGrouping, " Music Theory ");
        config.save(dir.path()).unwrap();

        let loaded = NotemarkConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_grouping, "Music Theory");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"file_ext": ".md"}"#).unwrap();
        let loaded = NotemarkConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".md");
        assert_eq!(loaded.default_grouping, "General");
    }
}
