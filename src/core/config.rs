//! Configuration management with layered hierarchy
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. Global user config (`<config dir>/stackcmp/config.yaml`)
//! 3. Project config (`.stackcmp.yaml` in the working directory)
//! 4. Environment variables (`STACKCMP_FORMAT`, `STACKCMP_THEME`)
//!
//! Command-line flags override all of these.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::estimator::{ComplexityTier, EstimatorInput};
use crate::core::style::Theme;

/// File name of the per-directory config
pub const PROJECT_CONFIG_FILE: &str = ".stackcmp.yaml";

/// stackcmp configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format (auto, tsv, csv, json, md)
    pub default_format: Option<String>,

    /// Color theme
    pub theme: Option<Theme>,

    /// Enable colored output
    pub color: Option<bool>,

    /// Show raw data tables under charts
    pub show_raw: Option<bool>,

    /// Default ROI calculator inputs
    pub roi: RoiDefaults,
}

/// Overrides for the ROI calculator's starting values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiDefaults {
    pub users: Option<i64>,
    pub months: Option<i64>,
    pub complexity: Option<ComplexityTier>,
    pub roi_percent: Option<f64>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let project_path = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE));
        let mut config =
            Self::load_from(Self::global_config_path().as_deref(), project_path.as_deref());
        config.apply_env();
        config
    }

    /// Load and merge the given config files (missing files are skipped)
    pub fn load_from(global: Option<&Path>, project: Option<&Path>) -> Self {
        let mut config = Config::default();
        for path in [global, project].into_iter().flatten() {
            if let Some(layer) = Self::read_file(path) {
                config.merge(layer);
            }
        }
        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable config");
                return None;
            }
        };
        match Self::from_yaml(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping invalid config");
                None
            }
        }
    }

    /// Parse a single config layer
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents)
    }

    fn apply_env(&mut self) {
        if let Ok(format) = std::env::var("STACKCMP_FORMAT") {
            self.default_format = Some(format);
        }
        if let Ok(theme) = std::env::var("STACKCMP_THEME") {
            match theme.parse::<Theme>() {
                Ok(t) => self.theme = Some(t),
                Err(e) => tracing::warn!(error = %e, "ignoring STACKCMP_THEME"),
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stackcmp")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.theme.is_some() {
            self.theme = other.theme;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.show_raw.is_some() {
            self.show_raw = other.show_raw;
        }
        if other.roi.users.is_some() {
            self.roi.users = other.roi.users;
        }
        if other.roi.months.is_some() {
            self.roi.months = other.roi.months;
        }
        if other.roi.complexity.is_some() {
            self.roi.complexity = other.roi.complexity;
        }
        if other.roi.roi_percent.is_some() {
            self.roi.roi_percent = other.roi.roi_percent;
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }

    pub fn color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn show_raw(&self) -> bool {
        self.show_raw.unwrap_or(true)
    }

    /// ROI calculator starting values with config overrides applied
    pub fn estimator_defaults(&self) -> EstimatorInput {
        let base = EstimatorInput::default();
        EstimatorInput {
            user_count: self.roi.users.unwrap_or(base.user_count),
            duration_months: self.roi.months.unwrap_or(base.duration_months),
            complexity: self.roi.complexity.unwrap_or(base.complexity),
            target_roi_percent: self.roi.roi_percent.unwrap_or(base.target_roi_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme(), Theme::Light);
        assert!(config.color());
        assert!(config.show_raw());
        assert_eq!(config.estimator_defaults(), EstimatorInput::default());
    }

    #[test]
    fn test_parse_yaml() {
        let config = Config::from_yaml(
            "theme: dark\nshow_raw: false\nroi:\n  users: 200\n  complexity: high\n",
        )
        .unwrap();
        assert_eq!(config.theme(), Theme::Dark);
        assert!(!config.show_raw());

        let input = config.estimator_defaults();
        assert_eq!(input.user_count, 200);
        assert_eq!(input.duration_months, 12);
        assert_eq!(input.complexity, ComplexityTier::High);
    }

    #[test]
    fn test_parse_yaml_any_case() {
        let config = Config::from_yaml("theme: Dark\nroi:\n  complexity: High\n").unwrap();
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(config.roi.complexity, Some(ComplexityTier::High));
        assert!(Config::from_yaml("roi:\n  complexity: extreme\n").is_err());
    }

    #[test]
    fn test_complexity_written_lowercase_reloads() {
        let config = Config::from_yaml("roi:\n  complexity: MEDIUM\n").unwrap();
        let yaml = serde_yml::to_string(&config).unwrap();
        assert!(yaml.contains("complexity: medium"), "{}", yaml);
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config::from_yaml("theme: dark\nroi:\n  months: 24\n").unwrap();
        let layer = Config::from_yaml("theme: light\ncolor: false\n").unwrap();
        base.merge(layer);
        assert_eq!(base.theme(), Theme::Light);
        assert!(!base.color());
        assert_eq!(base.roi.months, Some(24));
    }

    #[test]
    fn test_load_from_layers_and_skips_invalid() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.yaml");
        let project = tmp.path().join(PROJECT_CONFIG_FILE);
        std::fs::write(&global, "default_format: json\nroi:\n  roi_percent: 50\n").unwrap();
        std::fs::write(&project, "theme: [not, a, theme]\n").unwrap();

        let config = Config::load_from(Some(&global), Some(&project));
        assert_eq!(config.default_format.as_deref(), Some("json"));
        assert_eq!(config.estimator_defaults().target_roi_percent, 50.0);
        assert_eq!(config.theme(), Theme::Light);
    }

    #[test]
    fn test_load_from_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(Some(&tmp.path().join("nope.yaml")), None);
        assert_eq!(config, Config::default());
    }
}
