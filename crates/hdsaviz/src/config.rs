//! Viewer configuration.
//!
//! Loaded from a YAML file (see `presets/lignin.yaml`). Every section is
//! optional; missing fields fall back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, eyre};
use hdsaviz_core::{BarFilter, HeatmapFilter, ScanConfig, TableSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory holding the analysis files and companion tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub scan: ScanConfig,
    /// Input-parameters table, resolved against `data_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<TableSource>,
    /// Model-results table, resolved against `data_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<TableSource>,
    pub bars: BarSettings,
    pub heatmap: HeatmapFilter,
}

/// Initial state of the bar-chart controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarSettings {
    pub min_value: f64,
    pub top: usize,
    pub stacked: bool,
    pub error_bars: bool,
    pub log_axis: bool,
    pub highlighted: Vec<String>,
}

impl Default for BarSettings {
    fn default() -> Self {
        let filter = BarFilter::default();
        Self {
            min_value: filter.min_value,
            top: filter.top,
            stacked: true,
            error_bars: true,
            log_axis: true,
            highlighted: filter.highlighted,
        }
    }
}

impl BarSettings {
    pub fn filter(&self) -> BarFilter {
        BarFilter {
            min_value: self.min_value,
            top: self.top,
            highlighted: self.highlighted.clone(),
        }
    }
}

impl ViewerConfig {
    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> color_eyre::Result<Self> {
        serde_saphyr::from_str::<Self>(content)
            .map_err(|e| eyre!("Failed to parse viewer config: {e}"))
    }

    /// Load from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_yaml(&content)
            .wrap_err_with(|| format!("Invalid config {}", path.display()))?;

        // Relative data_dir is relative to the config file
        let relative = config.data_dir.take().map(|dir| match path.parent() {
            Some(parent) if dir.is_relative() => parent.join(dir),
            _ => dir,
        });
        config.data_dir = relative;
        tracing::debug!(path = %path.display(), "Loaded viewer config");
        Ok(config)
    }

    /// Data directory: command line first, then config, then the working directory.
    pub fn resolve_data_dir(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ViewerConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.scan.prefix, "analysis_");
        assert_eq!(config.bars.top, 20);
        assert_eq!(config.heatmap.top, 5);
    }

    #[test]
    fn test_lignin_preset_parses() {
        let config = ViewerConfig::from_yaml(include_str!("../presets/lignin.yaml")).unwrap();

        assert_eq!(config.scan.exclude.len(), 2);
        assert!(config.scan.is_excluded("analysis_light_aromatic-C-C.txt"));

        let params = config.params.unwrap();
        assert_eq!(params.path, PathBuf::from("input_parameters.csv"));
        assert_eq!(
            params.drop,
            Some(vec!["End_time".to_string(), "Oxygen".to_string()])
        );
        assert!(config.results.unwrap().drop.is_some());
        assert!(config.bars.log_axis);
    }

    #[test]
    fn test_partial_sections() {
        let yaml = "bars:\n  top: 7\n  stacked: false\nheatmap:\n  include: [k3]\n";
        let config = ViewerConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.bars.top, 7);
        assert!(!config.bars.stacked);
        assert_eq!(config.bars.min_value, 0.01);
        assert_eq!(config.heatmap.include, vec!["k3".to_string()]);
        assert!(config.heatmap.mirror);
    }

    #[test]
    fn test_load_resolves_data_dir_next_to_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");
        fs::write(&path, "data_dir: data\n").unwrap();

        let config = ViewerConfig::load(Some(&path)).unwrap();

        assert_eq!(config.data_dir, Some(dir.path().join("data")));
        assert_eq!(
            config.resolve_data_dir(Some(PathBuf::from("/cli"))),
            PathBuf::from("/cli")
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(ViewerConfig::load(Some(&dir.path().join("nope.yaml"))).is_err());
    }
}
