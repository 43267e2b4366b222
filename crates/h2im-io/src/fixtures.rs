//! Synthetic result trees for tests across the workspace.
//!
//! Values are either one constant for every metric cell, or a deterministic
//! function of (configuration, run, year, row, column) so that aggregations
//! can be checked by hand.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use h2im_core::schema::columns;
use h2im_core::{Granularity, ResultFile, SENSITIVITY_CONFIG_FILE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixtureValues {
    Constant(f64),
    Generated,
}

#[derive(Debug, Clone)]
pub struct FixtureSpec {
    pub configurations: u32,
    pub runs: u32,
    pub years: usize,
    /// Rows per year in daily tables
    pub days: usize,
    /// Rows per year in per-agent and per-asset tables
    pub agents: usize,
    pub values: FixtureValues,
}

impl FixtureSpec {
    pub fn constant(configurations: u32, runs: u32, value: f64) -> Self {
        Self {
            configurations,
            runs,
            years: 5,
            days: 4,
            agents: 3,
            values: FixtureValues::Constant(value),
        }
    }

    pub fn generated(configurations: u32, runs: u32) -> Self {
        Self {
            values: FixtureValues::Generated,
            ..Self::constant(configurations, runs, 0.0)
        }
    }

    pub fn with_years(mut self, years: usize) -> Self {
        self.years = years;
        self
    }

    fn rows_per_year(&self, file: ResultFile) -> usize {
        match (file.granularity(), file) {
            (Granularity::Daily, _) => self.days,
            (
                _,
                ResultFile::PowerProducers
                | ResultFile::HydrogenProducers
                | ResultFile::Manufacturers
                | ResultFile::Powerplants
                | ResultFile::Electrolyzers,
            ) => self.agents,
            _ => 1,
        }
    }

    fn value(&self, configuration: u32, run: u32, year: usize, row: usize, column: usize) -> f64 {
        match self.values {
            FixtureValues::Constant(value) => value,
            FixtureValues::Generated => {
                1.0 + f64::from(configuration) * 10.0
                    + f64::from(run)
                    + year as f64 * 0.5
                    + row as f64 * 0.25
                    + column as f64
            }
        }
    }
}

/// Write `sensitivity.config` plus every result file of every
/// (configuration, run) pair under `root`. Configurations sweep one
/// parameter, `const.beta`, over `0.1 * id`.
pub fn write_results_tree(root: &Path, spec: &FixtureSpec) -> Result<()> {
    write_sensitivity_config(root, spec)?;
    for configuration in 1..=spec.configurations {
        for run in 1..=spec.runs {
            let dir = root
                .join(format!("Sensitivity_{configuration}"))
                .join(format!("Run_{run}"));
            fs::create_dir_all(&dir)
                .with_context(|| format!("creating fixture directory {}", dir.display()))?;
            for file in ResultFile::ALL {
                let body = render_table(spec, file, configuration, run);
                let path = dir.join(file.file_name());
                fs::write(&path, body)
                    .with_context(|| format!("writing fixture {}", path.display()))?;
            }
        }
    }
    Ok(())
}

pub fn write_sensitivity_config(root: &Path, spec: &FixtureSpec) -> Result<()> {
    fs::create_dir_all(root)?;
    let mut text = String::from("type: grid\nparameters: [const.beta]\n");
    writeln!(text, "sensitivity_runs: {}", spec.runs)?;
    for configuration in 1..=spec.configurations {
        writeln!(
            text,
            "sensitivity_{configuration}: [{}]",
            f64::from(configuration) / 10.0
        )?;
    }
    let path = root.join(SENSITIVITY_CONFIG_FILE);
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
}

fn render_table(spec: &FixtureSpec, file: ResultFile, configuration: u32, run: u32) -> String {
    let keys = file.key_columns();
    let metrics = file.metric_columns();
    let mut out = keys
        .iter()
        .chain(metrics.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(";");
    out.push('\n');

    for year in 0..spec.years {
        for row in 0..spec.rows_per_year(file) {
            let mut cells: Vec<String> = vec![year.to_string()];
            if keys.len() > 1 {
                cells.push(row.to_string());
            }
            for (column, name) in metrics.iter().enumerate() {
                let value = if *name == columns::AGENT || *name == columns::PLANT {
                    row as f64
                } else {
                    spec.value(configuration, run, year, row, column)
                };
                cells.push(value.to_string());
            }
            out.push_str(&cells.join(";"));
            out.push('\n');
        }
    }
    out
}
