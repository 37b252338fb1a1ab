//! Configuration file support
//!
//! Loads settings from ~/.wordshot.toml (or %USERPROFILE%\.wordshot.toml on Windows)
//!
//! Example:
//! ```toml
//! # wordshot configuration
//! marker = "!{word}"
//! scale = 2.0
//! width = 500
//! height = 300
//! archive-folder = "images"
//!
//! [style]
//! color = "#333333"
//! fontWeight = "700"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::archive::DEFAULT_FOLDER;
use crate::error::{Result, WordshotError};
use crate::placeholder::DEFAULT_MARKER;
use crate::style::StyleDeclaration;
use crate::words::DEFAULT_DELIMITER;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Placeholder replaced by each word
    pub marker: String,
    /// Word list delimiter
    pub delimiter: char,
    /// Capture scale factor
    pub scale: f32,
    /// Capture width in CSS pixels
    pub width: Option<u32>,
    /// Capture height in CSS pixels
    pub height: Option<u32>,
    /// Folder inside the archive
    pub archive_folder: String,
    /// Output name in single-image mode
    pub single_name: String,
    /// Output name in batch mode
    pub archive_name: String,
    /// Sort the word list before exporting
    pub sort_words: bool,
    /// Base style for all text
    pub style: StyleDeclaration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            delimiter: DEFAULT_DELIMITER,
            scale: 2.0,
            width: Some(500),
            height: Some(300),
            archive_folder: DEFAULT_FOLDER.to_string(),
            single_name: "content.png".to_string(),
            archive_name: "content_images.zip".to_string(),
            sort_words: false,
            style: default_style(),
        }
    }
}

/// Base style of the preview text
fn default_style() -> StyleDeclaration {
    StyleDeclaration::color("#000000")
        .with_weight("400")
        .with_family("Arial")
        .with_size("20px")
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".wordshot.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".wordshot.toml"))
        }
    }

    /// Load configuration from file, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                warn!("Ignoring {}: {}", path.display(), e);
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(contents).map_err(|e| WordshotError::Config(e.to_string()))?;
        config.clamp();
        Ok(config)
    }

    /// Keep numeric settings in usable ranges
    fn clamp(&mut self) {
        if !self.scale.is_finite() {
            self.scale = 2.0;
        }
        self.scale = self.scale.clamp(0.25, 8.0);
        self.width = self.width.filter(|w| *w > 0);
        self.height = self.height.filter(|h| *h > 0);
        // The base style is a foundation for rule styles, so fill gaps
        self.style = default_style().merged(&self.style);
    }

    /// Save current configuration to the config file, returning its path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| WordshotError::Config("no home directory to save into".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save current configuration to `path`
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.to_toml())
    }

    fn to_toml(&self) -> String {
        let mut out = format!(
            "# wordshot configuration\n\
             # Generated automatically\n\n\
             marker = {:?}\n\
             delimiter = {:?}\n\
             scale = {:?}\n",
            self.marker,
            self.delimiter.to_string(),
            self.scale
        );
        if let Some(width) = self.width {
            out.push_str(&format!("width = {}\n", width));
        }
        if let Some(height) = self.height {
            out.push_str(&format!("height = {}\n", height));
        }
        out.push_str(&format!(
            "archive-folder = {:?}\n\
             single-name = {:?}\n\
             archive-name = {:?}\n\
             sort-words = {}\n\n[style]\n",
            self.archive_folder, self.single_name, self.archive_name, self.sort_words
        ));

        let style = &self.style;
        for (key, value) in [
            ("color", &style.color),
            ("backgroundColor", &style.background_color),
            ("fontWeight", &style.font_weight),
            ("fontStyle", &style.font_style),
            ("fontFamily", &style.font_family),
            ("fontSize", &style.font_size),
            ("textDecoration", &style.text_decoration),
        ] {
            if let Some(value) = value {
                out.push_str(&format!("{} = {:?}\n", key, value));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r##"
# Comment
marker = "{{name}}"
delimiter = ";"
scale = 3.0
width = 640
archive-folder = "out"
sort-words = true

[style]
color = "#333333"
fontWeight = 700
"##;

        let config = Config::parse(contents).unwrap();
        assert_eq!(config.marker, "{{name}}");
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.scale, 3.0);
        assert_eq!(config.width, Some(640));
        assert_eq!(config.height, Some(300));
        assert_eq!(config.archive_folder, "out");
        assert!(config.sort_words);
        assert_eq!(config.style.color.as_deref(), Some("#333333"));
        assert_eq!(config.style.font_weight.as_deref(), Some("700"));
        assert_eq!(config.style.font_family.as_deref(), Some("Arial"));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_clamped_values() {
        let config = Config::parse("scale = 100.0\nwidth = 0\n").unwrap();
        assert_eq!(config.scale, 8.0);
        assert_eq!(config.width, None);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("scale = \"big\"").unwrap_err();
        assert!(matches!(err, WordshotError::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.marker = "<w>".to_string();
        config.style = config.style.with_decoration("underline");
        assert_eq!(Config::parse(&config.to_toml()).unwrap(), config);
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".wordshot.toml");

        let mut config = Config::default();
        config.style = config.style.with_background("#ffee00");
        config.sort_words = true;
        config.save_to(&path).unwrap();

        let saved = Config::parse(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.style.background_color.as_deref(), Some("#ffee00"));
        assert_eq!(saved, config);
    }
}
