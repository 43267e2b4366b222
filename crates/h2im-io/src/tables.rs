//! Loading and concatenation of the per-run result tables.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use h2im_core::schema::{RUN, SENSITIVITY};
use h2im_core::{H2imError, ResultFile};
use polars::prelude::*;
use tracing::{debug, info};

use crate::layout::{ResultLayout, RunDir};

/// Semicolon is what the simulation writes.
pub const CSV_SEPARATOR: u8 = b';';

/// Read one result file, normalize column types and tag it with the ids of
/// the directory it came from.
pub fn read_result_file(dir: &RunDir, file: ResultFile) -> Result<DataFrame> {
    let path = dir.file_path(file);
    let mut df = read_semicolon_csv(&path)?;

    for key in file.key_columns() {
        if df.column(key).is_err() {
            return Err(H2imError::InvalidTable {
                path: path.clone(),
                reason: format!("missing key column '{key}'"),
            }
            .into());
        }
    }

    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for name in &names {
        let target = if file.key_columns().contains(&name.as_str()) {
            DataType::Int64
        } else {
            DataType::Float64
        };
        let cast = df
            .column(name)?
            .cast(&target)
            .with_context(|| format!("casting column '{name}' in {}", path.display()))?;
        df.replace(name, cast)?;
    }

    let height = df.height();
    df.with_column(Series::new(RUN, vec![i64::from(dir.run); height]))?;
    df.with_column(Series::new(
        SENSITIVITY,
        vec![i64::from(dir.configuration); height],
    ))?;
    debug!(path = %path.display(), rows = height, "loaded result file");
    Ok(df)
}

/// Dtypes are inferred from every row: daily tables often stay integral
/// for months before the first fractional price appears.
fn read_semicolon_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    CsvReader::new(file)
        .has_header(true)
        .with_separator(CSV_SEPARATOR)
        .infer_schema(None)
        .finish()
        .with_context(|| format!("reading CSV file {}", path.display()))
}

/// Load one combined table per entry of `files`, returned in the same
/// positional order. Rows are appended run by run, and within a run
/// configuration by configuration.
pub fn load_tables(layout: &ResultLayout, files: &[ResultFile]) -> Result<Vec<DataFrame>> {
    layout.validate(files)?;
    let order = layout.load_order();
    files
        .iter()
        .map(|file| concat_file(&order, *file))
        .collect()
}

fn concat_file(order: &[RunDir], file: ResultFile) -> Result<DataFrame> {
    let mut combined: Option<DataFrame> = None;
    let mut columns: Vec<String> = Vec::new();

    for dir in order {
        let frame = read_result_file(dir, file)?;
        match combined.as_mut() {
            None => {
                columns = frame
                    .get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                combined = Some(frame);
            }
            Some(acc) => {
                let aligned = frame
                    .select(columns.iter().map(String::as_str))
                    .with_context(|| {
                        format!(
                            "{} in {} does not match the columns of earlier runs",
                            file,
                            dir.path.display()
                        )
                    })?;
                acc.vstack_mut(&aligned)
                    .with_context(|| format!("appending {} from {}", file, dir.path.display()))?;
            }
        }
    }

    let mut combined =
        combined.ok_or_else(|| anyhow!("no run directories to load {} from", file))?;
    combined.align_chunks();
    info!(file = %file, rows = combined.height(), "combined result table");
    Ok(combined)
}

/// All twelve combined tables, addressable by file type.
#[derive(Debug, Clone, Default)]
pub struct ResultTables {
    tables: BTreeMap<ResultFile, DataFrame>,
}

impl ResultTables {
    pub fn load(layout: &ResultLayout) -> Result<Self> {
        let frames = load_tables(layout, &ResultFile::ALL)?;
        Ok(Self {
            tables: ResultFile::ALL.into_iter().zip(frames).collect(),
        })
    }

    pub fn get(&self, file: ResultFile) -> Result<&DataFrame> {
        self.tables
            .get(&file)
            .ok_or_else(|| anyhow!("result table {} was not loaded", file))
    }

    pub fn row_count(&self, file: ResultFile) -> usize {
        self.tables.get(&file).map_or(0, DataFrame::height)
    }
}
