//! Parser for the `sensitivity.config` descriptor written by the simulation.
//!
//! The format is line oriented `key: value`:
//!
//! ```text
//! # sweep over the learning parameter
//! type: grid
//! parameters: [const.beta, const.gamma]
//! sensitivity_runs: 3
//! sensitivity_1: [0.5, 2]
//! sensitivity_2: [0.8, 2]
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{H2imError, H2imResult};

pub const SENSITIVITY_CONFIG_FILE: &str = "sensitivity.config";

const TYPE_KEY: &str = "type";
const PARAMETERS_KEY: &str = "parameters";
const RUNS_KEY: &str = "sensitivity_runs";
const CONFIGURATION_PREFIX: &str = "sensitivity_";
const DISABLED_TYPE: &str = "none";

/// One swept combination of parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub id: u32,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensitivitySettings {
    analysis_type: String,
    parameters: Vec<String>,
    run_count: u32,
    configurations: Vec<Configuration>,
}

impl SensitivitySettings {
    pub fn new(
        analysis_type: impl Into<String>,
        parameters: Vec<String>,
        run_count: u32,
        configurations: Vec<Configuration>,
    ) -> Self {
        Self {
            analysis_type: analysis_type.into(),
            parameters,
            run_count,
            configurations,
        }
    }

    /// Read `sensitivity.config` from a results root directory.
    pub fn from_dir(root: &Path) -> H2imResult<Self> {
        Self::from_path(&root.join(SENSITIVITY_CONFIG_FILE))
    }

    pub fn from_path(path: &Path) -> H2imResult<Self> {
        if !path.is_file() {
            return Err(H2imError::ConfigNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> H2imResult<Self> {
        let mut analysis_type = None;
        let mut parameters = None;
        let mut run_count = None;
        let mut configurations: Vec<Configuration> = Vec::new();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once(':').ok_or_else(|| {
                H2imError::InvalidConfig(format!(
                    "line {}: expected 'key: value', found '{line}'",
                    line_no + 1
                ))
            })?;
            let key = key.trim();
            let value = value.trim();

            if key == TYPE_KEY {
                if value.eq_ignore_ascii_case(DISABLED_TYPE) {
                    return Err(H2imError::SensitivityDisabled(value.to_string()));
                }
                analysis_type = Some(value.to_string());
            } else if key == PARAMETERS_KEY {
                parameters = Some(split_list(value).map(str::to_string).collect::<Vec<_>>());
            } else if key == RUNS_KEY {
                let count = value.parse::<u32>().map_err(|_| {
                    H2imError::InvalidConfig(format!("{RUNS_KEY} must be an integer, got '{value}'"))
                })?;
                run_count = Some(count);
            } else if let Some(suffix) = key.strip_prefix(CONFIGURATION_PREFIX) {
                if key.ends_with("_runs") {
                    debug!(key, "ignoring run-count style key");
                    continue;
                }
                // a named configuration takes its declaration position as id
                let id = match suffix.parse::<u32>() {
                    Ok(id) => id,
                    Err(_) => {
                        let position = configurations.len() as u32 + 1;
                        debug!(key, id = position, "configuration without numeric suffix");
                        position
                    }
                };
                if configurations.iter().any(|c| c.id == id) {
                    return Err(H2imError::InvalidConfig(format!(
                        "configuration {id} is declared twice"
                    )));
                }
                let values = split_list(value)
                    .map(|item| {
                        item.parse::<f64>().map_err(|_| {
                            H2imError::InvalidConfig(format!(
                                "configuration {id}: '{item}' is not a number"
                            ))
                        })
                    })
                    .collect::<H2imResult<Vec<_>>>()?;
                configurations.push(Configuration { id, values });
            } else {
                debug!(key, "ignoring unknown sensitivity key");
            }
        }

        let analysis_type = analysis_type
            .ok_or_else(|| H2imError::InvalidConfig(format!("missing '{TYPE_KEY}' entry")))?;
        let parameters = parameters
            .ok_or_else(|| H2imError::InvalidConfig(format!("missing '{PARAMETERS_KEY}' entry")))?;
        let run_count = run_count
            .ok_or_else(|| H2imError::InvalidConfig(format!("missing '{RUNS_KEY}' entry")))?;

        if let Some(bad) = configurations
            .iter()
            .find(|c| c.values.len() != parameters.len())
        {
            return Err(H2imError::InvalidConfig(format!(
                "configuration {} has {} value(s) for {} parameter(s)",
                bad.id,
                bad.values.len(),
                parameters.len()
            )));
        }

        Ok(Self {
            analysis_type,
            parameters,
            run_count,
            configurations,
        })
    }

    pub fn analysis_type(&self) -> &str {
        &self.analysis_type
    }

    /// "No. of Runs": stochastic repetitions per configuration.
    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Parameter value tuples in declaration order.
    pub fn values(&self) -> Vec<Vec<f64>> {
        self.configurations.iter().map(|c| c.values.clone()).collect()
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn configuration(&self, id: u32) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    pub fn configuration_ids(&self) -> Vec<u32> {
        self.configurations.iter().map(|c| c.id).collect()
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')'])
        .split(',')
        .map(|item| item.trim().trim_matches(['\'', '"']).trim())
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const GRID: &str = "\
type: grid
parameters: [const.beta]
sensitivity_runs: 3
sensitivity_1: [0.5]
sensitivity_2: [0.8]
";

    #[test]
    fn parses_grid_descriptor() {
        let settings = SensitivitySettings::parse(GRID).unwrap();
        assert_eq!(settings.analysis_type(), "grid");
        assert_eq!(settings.run_count(), 3);
        assert_eq!(settings.parameters(), ["const.beta".to_string()]);
        assert_eq!(settings.values(), vec![vec![0.5], vec![0.8]]);
        assert_eq!(settings.configuration_ids(), vec![1, 2]);
    }

    #[test]
    fn comments_quotes_and_multiple_parameters() {
        let text = "\
# generated by the model
type: random
parameters: ['const.beta', 'const.gamma']
sensitivity_runs: 2
# first sweep point
sensitivity_7: [0.1, 4]
";
        let settings = SensitivitySettings::parse(text).unwrap();
        assert_eq!(settings.parameters(), ["const.beta", "const.gamma"]);
        assert_eq!(settings.configuration(7).unwrap().values, vec![0.1, 4.0]);
        assert!(settings.configuration(1).is_none());
    }

    #[test]
    fn type_none_disables_analysis() {
        let err = SensitivitySettings::parse("type: none\nsensitivity_runs: 1\n").unwrap_err();
        assert!(matches!(err, H2imError::SensitivityDisabled(_)));
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempdir().unwrap();
        let err = SensitivitySettings::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, H2imError::ConfigNotFound(_)));
    }

    #[test]
    fn reads_from_results_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SENSITIVITY_CONFIG_FILE), GRID).unwrap();
        let settings = SensitivitySettings::from_dir(dir.path()).unwrap();
        assert_eq!(settings.configurations().len(), 2);
    }

    #[test]
    fn rejects_value_count_mismatch() {
        let text = "type: grid\nparameters: [a, b]\nsensitivity_runs: 1\nsensitivity_1: [1]\n";
        let err = SensitivitySettings::parse(text).unwrap_err();
        assert!(matches!(err, H2imError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_non_numeric_values_and_duplicates() {
        let bad_value = "type: grid\nparameters: [a]\nsensitivity_runs: 1\nsensitivity_1: [x]\n";
        assert!(SensitivitySettings::parse(bad_value).is_err());
        let duplicate =
            "type: grid\nparameters: [a]\nsensitivity_runs: 1\nsensitivity_1: [1]\nsensitivity_1: [2]\n";
        assert!(SensitivitySettings::parse(duplicate).is_err());
    }

    #[test]
    fn named_configuration_uses_declaration_position() {
        let text = "type: grid\nparameters: [a]\nsensitivity_runs: 2\n\
                    sensitivity_1: [0.5]\nsensitivity_high: [0.9]\n";
        let settings = SensitivitySettings::parse(text).unwrap();
        assert_eq!(settings.configuration_ids(), vec![1, 2]);
        assert_eq!(settings.configuration(2).unwrap().values, vec![0.9]);
    }

    #[test]
    fn missing_runs_is_invalid() {
        let err = SensitivitySettings::parse("type: grid\nparameters: [a]\n").unwrap_err();
        assert!(err.to_string().contains("sensitivity_runs"));
    }
}
