//! Loading everything the viewer and commands need from one directory.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use hdsaviz_core::{SensitivityResultSet, Table, TableSource, read_sensitivity_dir};

use crate::config::ViewerConfig;

/// Sensitivity results plus the optional companion tables.
pub struct Dataset {
    pub results: SensitivityResultSet,
    pub params: Option<Table>,
    pub model_results: Option<Table>,
}

impl Dataset {
    pub fn load(dir: &Path, config: &ViewerConfig) -> color_eyre::Result<Self> {
        let results = read_sensitivity_dir(dir, &config.scan).wrap_err_with(|| {
            format!("Failed to load sensitivity results from {}", dir.display())
        })?;
        let params = read_companion(dir, config.params.as_ref(), "input parameters")?;
        let model_results = read_companion(dir, config.results.as_ref(), "model results")?;

        let dataset = Self {
            results,
            params,
            model_results,
        };
        dataset.check_parameter_names();
        Ok(dataset)
    }

    /// Parameters in the inputs table that no analysis file mentions, and
    /// the reverse. Either list being non-empty usually means a wrong `drop`.
    pub fn parameter_mismatch(&self) -> Option<(Vec<String>, Vec<String>)> {
        let params = self.params.as_ref()?;
        let analysed = self.results.parameters();
        let only_inputs: Vec<String> = params
            .columns()
            .iter()
            .filter(|c| !analysed.contains(c))
            .cloned()
            .collect();
        let only_analysis: Vec<String> = analysed
            .into_iter()
            .filter(|p| !params.has_column(p))
            .collect();
        Some((only_inputs, only_analysis))
    }

    fn check_parameter_names(&self) {
        if let Some((only_inputs, only_analysis)) = self.parameter_mismatch()
            && (!only_inputs.is_empty() || !only_analysis.is_empty())
        {
            tracing::warn!(
                ?only_inputs,
                ?only_analysis,
                "Input parameter columns do not match analysed parameters"
            );
        }
    }
}

fn read_companion(
    dir: &Path,
    source: Option<&TableSource>,
    label: &str,
) -> color_eyre::Result<Option<Table>> {
    let Some(source) = source else {
        return Ok(None);
    };
    let table = source
        .read(dir)
        .wrap_err_with(|| format!("Failed to read {label} table"))?;
    tracing::info!(
        table = label,
        rows = table.len(),
        columns = table.columns().len(),
        "Loaded companion table"
    );
    Ok(Some(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ANALYSIS: &str =
        "Parameter S1 S1_conf ST ST_conf\nrxn1 0.4 0.02 0.5 0.03\nrxn2 0.1 0.01 0.2 0.01\n";

    #[test]
    fn test_load_with_companion_tables() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("analysis_CO.txt"), ANALYSIS).unwrap();
        fs::write(
            dir.path().join("input_parameters.csv"),
            "End_time,k1,k2,k9\n1,2,3,4\n",
        )
        .unwrap();
        let config = ViewerConfig::from_yaml(
            "params:\n  path: input_parameters.csv\n  drop: [End_time]\n",
        )
        .unwrap();

        let dataset = Dataset::load(dir.path(), &config).unwrap();

        assert_eq!(dataset.results.len(), 1);
        assert!(dataset.model_results.is_none());
        let (only_inputs, only_analysis) = dataset.parameter_mismatch().unwrap();
        assert_eq!(only_inputs, ["k9"]);
        assert!(only_analysis.is_empty());
    }

    #[test]
    fn test_missing_companion_file_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("analysis_CO.txt"), ANALYSIS).unwrap();
        let config = ViewerConfig::from_yaml("results:\n  path: results.csv\n").unwrap();

        assert!(Dataset::load(dir.path(), &config).is_err());
    }
}
