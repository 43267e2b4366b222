//! Plot configuration, optionally read from a TOML file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::horizon::{Horizon, DEFAULT_BASE_YEAR};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    /// Calendar year of simulation year 0
    #[serde(default = "default_base_year")]
    pub base_year: i32,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub labels: LabelConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            base_year: default_base_year(),
            image: ImageConfig::default(),
            labels: LabelConfig::default(),
        }
    }
}

fn default_base_year() -> i32 {
    DEFAULT_BASE_YEAR
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading plot configuration '{}'", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("parsing plot configuration '{}'", path.display()))
    }

    /// Defaults when no file is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn horizon(&self) -> Horizon {
        Horizon::new(self.base_year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageConfig {
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    900
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(anyhow!("unsupported image format '{other}'; use png or svg")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LabelConfig {
    #[serde(default)]
    pub policy: LabelPolicy,
}

/// What the legend does with a swept parameter that has no known symbol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// Use the raw parameter name
    #[default]
    Lenient,
    /// Fail the plot
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_yields_defaults() {
        let config: PlotConfig = toml::from_str("").unwrap();
        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.image.format, ImageFormat::Png);
        assert_eq!(config.horizon().base_year(), DEFAULT_BASE_YEAR);
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let text = "base_year = 2030\n[image]\nformat = \"svg\"\n[labels]\npolicy = \"strict\"\n";
        let config: PlotConfig = toml::from_str(text).unwrap();
        assert_eq!(config.base_year, 2030);
        assert_eq!(config.image.format, ImageFormat::Svg);
        assert_eq!(config.image.width, 1600);
        assert_eq!(config.labels.policy, LabelPolicy::Strict);
    }

    #[test]
    fn load_reads_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "base_year = 2040\n").unwrap();
        let config = PlotConfig::load(file.path()).unwrap();
        assert_eq!(config.horizon().calendar_year(1), 2041);
    }

    #[test]
    fn image_format_from_str() {
        assert_eq!("SVG".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert!("jpeg".parse::<ImageFormat>().is_err());
    }
}
