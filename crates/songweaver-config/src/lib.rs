use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the settings file location
pub const CONFIG_PATH_ENV: &str = "SONGWEAVER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Accent colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Cyan,
    Rose,
    Emerald,
}

impl Theme {
    pub const ALL: &'static [Theme] = &[Theme::Cyan, Theme::Rose, Theme::Emerald];

    /// Primary colour as RGB
    pub fn primary(self) -> (u8, u8, u8) {
        match self {
            Theme::Cyan => (8, 145, 178),
            Theme::Rose => (225, 29, 72),
            Theme::Emerald => (5, 150, 105),
        }
    }

    /// Accent colour as RGB
    pub fn accent(self) -> (u8, u8, u8) {
        match self {
            Theme::Cyan => (6, 182, 212),
            Theme::Rose => (244, 63, 94),
            Theme::Emerald => (16, 185, 129),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Cyan => "cyan",
            Theme::Rose => "rose",
            Theme::Emerald => "emerald",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Theme::Cyan => Theme::Rose,
            Theme::Rose => Theme::Emerald,
            Theme::Emerald => Theme::Cyan,
        }
    }
}

/// User settings. Missing keys fall back to [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub artist_name: String,
    pub studio_name: String,
    pub album_name: String,
    pub copyright: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub studio_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_logo: Option<String>,
    pub studio_bio: String,
    pub studio_website: String,
    pub studio_email: String,
    pub studio_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splash_background: Option<String>,
    pub server_address: String,
    /// Shell command that turns a lyrics request on stdin into lyrics on stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            artist_name: String::new(),
            studio_name: "BioSpark Studios".to_string(),
            album_name: String::new(),
            copyright: format!("© {} My Music", chrono::Local::now().year()),
            studio_logo: None,
            artist_logo: None,
            studio_bio: String::new(),
            studio_website: String::new(),
            studio_email: String::new(),
            studio_phone: String::new(),
            splash_background: None,
            server_address: "http://localhost:5173".to_string(),
            generator_command: None,
        }
    }
}

impl Settings {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(settings))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Settings from `config_path`, or defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Self {
        match Self::load_from_path(config_path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    /// `~/.config/songweaver/settings.toml`, unless `SONGWEAVER_CONFIG` is set
    pub fn config_path() -> PathBuf {
        Self::config_path_from(std::env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    fn config_path_from(override_path: Option<&str>) -> PathBuf {
        if let Some(path) = override_path.filter(|p| !p.is_empty()) {
            let path = PathBuf::from(path);
            return Self::expand_path(&path).unwrap_or(path);
        }
        let config_dir = shellexpand::tilde("~/.config/songweaver");
        PathBuf::from(config_dir.as_ref()).join("settings.toml")
    }

    /// Directory holding the settings file; logs go here too
    pub fn config_dir() -> PathBuf {
        let path = Self::config_path();
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Settings::config_path_from(None);
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/songweaver/settings.toml"));
    }

    #[test]
    fn test_config_path_override_is_expanded() {
        unsafe {
            env::set_var("SONGWEAVER_TEST_HOME", "/test/env/path");
        }

        let config_path = Settings::config_path_from(Some("$SONGWEAVER_TEST_HOME/sw.toml"));
        assert_eq!(config_path, PathBuf::from("/test/env/path/sw.toml"));

        let empty = Settings::config_path_from(Some(""));
        assert!(empty.ends_with("songweaver/settings.toml"));

        unsafe {
            env::remove_var("SONGWEAVER_TEST_HOME");
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        let year = chrono::Local::now().year();

        assert_eq!(settings.theme, Theme::Cyan);
        assert_eq!(settings.studio_name, "BioSpark Studios");
        assert_eq!(settings.copyright, format!("© {year} My Music"));
        assert_eq!(settings.server_address, "http://localhost:5173");
        assert_eq!(settings.artist_name, "");
        assert_eq!(settings.generator_command, None);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let settings: Settings = toml::from_str(
            r#"
theme = "rose"
artistName = "Nova"
"#,
        )
        .unwrap();

        assert_eq!(settings.theme, Theme::Rose);
        assert_eq!(settings.artist_name, "Nova");
        assert_eq!(settings.studio_name, "BioSpark Studios");
    }

    #[test]
    fn test_keys_are_camel_case() {
        let settings = Settings {
            artist_name: "Nova".to_string(),
            generator_command: Some("llm -s".to_string()),
            ..Settings::default()
        };

        let toml_str = toml::to_string(&settings).unwrap();

        assert!(toml_str.contains("artistName = \"Nova\""));
        assert!(toml_str.contains("generatorCommand = \"llm -s\""));
        assert!(toml_str.contains("theme = \"cyan\""));
        assert!(!toml_str.contains("studioLogo"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Settings::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Settings::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Settings::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/settings.toml");
        let settings = Settings {
            theme: Theme::Emerald,
            artist_name: "Nova".to_string(),
            album_name: "Night Drive".to_string(),
            artist_logo: Some("data:image/png;base64,AAAA".to_string()),
            ..Settings::default()
        };

        settings.save_to_path(&config_file).unwrap();
        let loaded = Settings::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_unparseable_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("settings.toml");
        std::fs::write(&config_file, "theme = [not toml").unwrap();

        assert!(matches!(
            Settings::load_from_path(&config_file),
            Err(ConfigError::ConfigParseError { .. })
        ));
        assert_eq!(Settings::load_or_default(&config_file), Settings::default());
    }

    #[test]
    fn test_theme_cycles() {
        let mut theme = Theme::Cyan;
        for _ in 0..Theme::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Cyan);
        assert_eq!(Theme::Rose.primary(), (225, 29, 72));
    }
}
