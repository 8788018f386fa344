// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the widgets, read from a TOML file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::constant::{CONFIG_DIR, CONFIG_FILE, DEFAULT_ACCEPT, DEFAULT_MAX_FILES};
use crate::domain::crop::CropConfig;
use crate::domain::files::AcceptFilter;
use crate::domain::range::RangeConfig;

/// Global configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum number of files the multi-file picker keeps.
    pub max_files: usize,
    /// Accept filter of the file pickers (`image/*`, `.pdf`, ...).
    pub accept: String,
    /// Where cropped images are written when no output path is given.
    pub default_output_dir: Option<PathBuf>,
    /// Defaults for range swipers.
    pub range: RangeConfig,
    /// Cropper policy (region size, resize limits, container caps).
    pub crop: CropConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            accept: DEFAULT_ACCEPT.to_string(),
            default_output_dir: dirs::picture_dir().or_else(dirs::home_dir),
            range: RangeConfig::default(),
            crop: CropConfig::default(),
        }
    }
}

impl AppConfig {
    /// Per-user config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, else from the per-user location.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.range.validate().context("invalid [range] section")?;
        self.crop.validate().context("invalid [crop] section")?;
        Ok(())
    }

    pub fn accept_filter(&self) -> AcceptFilter {
        AcceptFilter::parse(&self.accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crop::Shape;
    use crate::domain::range::KnobOrdering;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "max_files = 3\n\n[range]\nmax = 10\nordering = \"clamped\"\n\n[crop]\nshape = \"circle\"\nmin_size = 80.0\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.max_files, 3);
        assert_eq!(config.range.max, 10.0);
        assert_eq!(config.range.ordering, KnobOrdering::Clamped);
        assert_eq!(config.crop.shape, Shape::Circle);
        assert_eq!(config.crop.min_size, 80.0);
        assert_eq!(config.crop.max_size, 120.0);
    }

    #[test]
    fn invalid_bounds_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[range]\nmin = 5\nmax = 1\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid [range] section"));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.accept = ".png".to_string();
        config.range.unit = "kg".to_string();

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }
}
