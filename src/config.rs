//! Configuration file handling for monosay.
//!
//! Loads configuration from `~/.config/monosay/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bubble::DEFAULT_LINE_WIDTH;
use crate::plugin::{PluginSettings, DEFAULT_PREFIX, MASCOT_WIDTH_COLUMNS};
use crate::render::{Color, FontSource, RenderStyle, DEFAULT_FONT_SIZE, DEFAULT_WIDTH_COLUMNS};

/// Upper bound for every column width, in config and on the command line.
pub const MAX_COLUMNS: usize = 1000;

/// Configuration file structure for monosay.
/// Loaded from ~/.config/monosay/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub bubble: BubbleConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BotConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BubbleConfig {
    #[serde(default = "default_bubble_width")]
    pub width: usize,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            width: default_bubble_width(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default = "default_background")]
    pub background: Color,
    /// TrueType/OpenType font; the builtin bitmap font is used when unset.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_padding")]
    pub left_padding: u32,
    #[serde(default = "default_padding")]
    pub right_padding: u32,
    #[serde(default = "default_monospaced_columns")]
    pub monospaced_columns: usize,
    #[serde(default = "default_mascot_columns")]
    pub mascot_columns: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            background: default_background(),
            font_path: None,
            font_size: default_font_size(),
            left_padding: default_padding(),
            right_padding: default_padding(),
            monospaced_columns: default_monospaced_columns(),
            mascot_columns: default_mascot_columns(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_bubble_width() -> usize {
    DEFAULT_LINE_WIDTH
}

fn default_color() -> Color {
    RenderStyle::default().color
}

fn default_background() -> Color {
    RenderStyle::default().background
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_padding() -> u32 {
    3
}

fn default_monospaced_columns() -> usize {
    DEFAULT_WIDTH_COLUMNS
}

fn default_mascot_columns() -> usize {
    MASCOT_WIDTH_COLUMNS
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            config.validate().map_err(|reason| ConfigError::Invalid {
                path: path.clone(),
                reason,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Check value ranges that TOML types alone cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let widths = [
            ("bubble.width", self.bubble.width),
            ("render.monospaced_columns", self.render.monospaced_columns),
            ("render.mascot_columns", self.render.mascot_columns),
        ];
        for (key, value) in widths {
            if !(1..=MAX_COLUMNS).contains(&value) {
                return Err(format!("{key} must be between 1 and {MAX_COLUMNS}, got {value}"));
            }
        }
        let size = self.render.font_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(format!("render.font_size must be positive, got {size}"));
        }
        Ok(())
    }

    /// Rasterizer style described by the `[render]` section.
    pub fn render_style(&self) -> RenderStyle {
        let render = &self.render;
        let font = match &render.font_path {
            Some(path) => FontSource::file(path, render.font_size),
            None => FontSource::Builtin,
        };
        RenderStyle {
            color: render.color,
            background: render.background,
            font,
            left_padding: render.left_padding,
            right_padding: render.right_padding,
            width_columns: render.monospaced_columns,
        }
    }

    pub fn plugin_settings(&self) -> PluginSettings {
        PluginSettings {
            prefix: self.bot.prefix.clone(),
            bubble_width: self.bubble.width,
            monospaced_columns: self.render.monospaced_columns,
            mascot_columns: self.render.mascot_columns,
            style: self.render_style(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config file '{}': {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("monosay").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/monosay/config.toml")
        })
}

/// Contents written by `monosay config init`.
pub const DEFAULT_CONFIG_TOML: &str = r##"# monosay configuration

[bot]
# Command prefix: "/cowsay text", "/tuxsay text", "/monospaced text"
prefix = "/"

[bubble]
# Bubble wrap width in columns
width = 40

[render]
# Text and background colors (#rgb, #rgba, #rrggbb or #rrggbbaa)
color = "#888"
background = "#000"
# TrueType/OpenType font (default: builtin 6x13 bitmap font)
# font_path = "/usr/share/fonts/TTF/DejaVuSansMono.ttf"
font_size = 13.0
left_padding = 3
right_padding = 3
# Image width in columns for plain monospaced text and for mascot bubbles
monospaced_columns = 80
mascot_columns = 50
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bot.prefix, "/");
        assert_eq!(config.bubble.width, 40);
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[bot]\nprefix = \"!\"\n[render]\ncolor = \"#fff\"\nfont_path = \"/fonts/mono.ttf\"\nfont_size = 20.0\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.bubble.width, 40);

        let style = config.render_style();
        assert_eq!(style.color, Color::rgb(255, 255, 255));
        assert_eq!(style.background, Color::rgb(0, 0, 0));
        assert_eq!(style.font, FontSource::file("/fonts/mono.ttf", 20.0));
    }

    #[test]
    fn test_plugin_settings_from_config() {
        let config = Config::default();
        let settings = config.plugin_settings();
        assert_eq!(settings, PluginSettings::default());
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render]\ncolor = \"blue\"\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_zero_width_is_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render]\nmascot_columns = 0\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("render.mascot_columns"));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.bubble.width = 0;
        assert!(config.validate().unwrap_err().contains("bubble.width"));

        let mut config = Config::default();
        config.render.monospaced_columns = 100_000_000;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.render.font_size = -1.0;
        assert!(config.validate().unwrap_err().contains("font_size"));
    }

    #[test]
    fn test_default_path() {
        let path = default_path();
        assert!(path.ends_with("monosay/config.toml"));
    }
}
