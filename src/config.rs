//! Render settings: defaults, optional JSON file, command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::charts::ImageFormat;

pub const DEFAULT_INPUT: &str = "results.csv";
pub const DEFAULT_WIDTH: u32 = 1000;
pub const MIN_WIDTH: u32 = 200;
pub const MAX_WIDTH: u32 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Chart width {0} px is outside {min}..={max} px", min = MIN_WIDTH, max = MAX_WIDTH)]
    InvalidWidth(u32),
}

/// Where charts come from and where they go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Results file to read.
    pub input: PathBuf,
    /// Directory for image output.
    pub out_dir: PathBuf,
    pub format: ImageFormat,
    /// Figure width in pixels; height follows the 5:3 aspect ratio.
    pub width: u32,
    /// Open each image with the system viewer after writing it.
    pub open: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from("."),
            format: ImageFormat::Png,
            width: DEFAULT_WIDTH,
            open: false,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct RenderOverrides {
    pub input: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub format: Option<ImageFormat>,
    pub width: Option<u32>,
    pub open: bool,
}

impl RenderConfig {
    /// Read a JSON config. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then `file` if given, then `overrides`; validated.
    pub fn resolve(file: Option<&Path>, overrides: RenderOverrides) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: RenderOverrides) {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        self.open |= overrides.open;
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width) {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        Ok(())
    }
}
