//! User configuration loaded from TOML.
//!
//! ```toml
//! [display]
//! default_font_size = 25
//! min_font_size = 10
//! width = 320
//! padding = 30
//! glyph_advance = 0.6
//!
//! [history]
//! max_records = 100
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::calculator::{Editor, FontScale, History, MonospaceMetrics};

const APP_DIR: &str = "padcalc";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("min_font_size ({min}) must be between 1 and default_font_size ({default})")]
    FontSizes { min: u32, default: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub history: HistoryConfig,
}

/// Geometry of the input line.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_font_size: u32,
    pub min_font_size: u32,
    /// Input line width in pixels.
    pub width: u32,
    /// Pixels of the width not available to text.
    pub padding: u32,
    /// Glyph advance as a fraction of the font size.
    pub glyph_advance: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_font_size: 25,
            min_font_size: 10,
            width: 320,
            padding: 30,
            glyph_advance: 0.6,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Unlimited when unset.
    pub max_records: Option<usize>,
}

impl Config {
    /// Default location, `<config dir>/padcalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid TOML or has
    /// inconsistent font sizes.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the default location if it exists.
    ///
    /// A missing default file yields the defaults; an explicit path must
    /// exist.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML or inconsistent font sizes.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if display.min_font_size == 0 || display.min_font_size > display.default_font_size {
            return Err(ConfigError::FontSizes {
                min: display.min_font_size,
                default: display.default_font_size,
            });
        }
        Ok(())
    }

    pub fn font_scale(&self) -> FontScale {
        FontScale::new(self.display.default_font_size, self.display.min_font_size)
    }

    pub fn metrics(&self) -> MonospaceMetrics {
        MonospaceMetrics::new(
            self.display.width,
            self.display.padding,
            self.display.glyph_advance,
        )
    }

    pub fn history(&self) -> History {
        match self.history.max_records {
            Some(max) => History::with_capacity(max),
            None => History::new(),
        }
    }

    /// Build an editor with the system clipboard and fasteval.
    pub fn editor(&self) -> Editor {
        Editor::new(self.font_scale())
            .with_history(self.history())
            .with_width_oracle(self.metrics())
    }
}
