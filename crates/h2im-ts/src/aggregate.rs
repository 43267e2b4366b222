//! Two-stage reduction of a combined result table into a [`PlotSeries`]:
//! rows collapse to one value per (year, configuration, run), then runs
//! collapse to one value per (year, configuration).

use std::fmt;

use anyhow::{Context, Result};
use h2im_core::schema::{RUN, SENSITIVITY, YEAR};
use h2im_core::Horizon;
use polars::prelude::*;

use crate::metric::Metric;
use crate::series::PlotSeries;

const VALUE: &str = "value";

/// How rows collapse within one (year, configuration, run).
#[derive(Debug, Clone, PartialEq)]
pub enum RunReduce {
    Sum,
    Mean,
    Median,
    Max,
    /// Rows carrying a metric value
    Count,
    /// `sum(metric * weight) / sum(weight)`, null when the weights sum to zero
    WeightedMean(String),
}

impl RunReduce {
    pub fn weighted_by(weight: &str) -> Self {
        RunReduce::WeightedMean(weight.to_string())
    }

    fn agg(&self, value: Expr) -> Expr {
        let present = value.clone().is_not_null().sum();
        match self {
            // an all-null group has no total, not a zero one
            RunReduce::Sum => when(present.eq(lit(0)))
                .then(lit(NULL))
                .otherwise(value.sum()),
            RunReduce::Mean => value.mean(),
            RunReduce::Median => value.median(),
            RunReduce::Max => value.max(),
            RunReduce::Count => when(present.clone().eq(lit(0)))
                .then(lit(NULL))
                .otherwise(present.cast(DataType::Float64)),
            RunReduce::WeightedMean(weight) => {
                // rows without a metric value do not contribute weight
                let weight = when(value.clone().is_null())
                    .then(lit(0.0))
                    .otherwise(col(weight));
                when(weight.clone().sum().eq(lit(0.0)))
                    .then(lit(NULL))
                    .otherwise((value * weight.clone()).sum() / weight.sum())
            }
        }
    }
}

/// Cross-run statistic within one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Median,
}

impl Statistic {
    fn agg(&self, value: Expr) -> Expr {
        match self {
            Statistic::Mean => value.mean(),
            Statistic::Median => value.median(),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Mean => f.write_str("mean"),
            Statistic::Median => f.write_str("median"),
        }
    }
}

/// One named output column of [`run_level`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetric {
    pub alias: String,
    pub metric: Metric,
    pub reduce: RunReduce,
}

impl RunMetric {
    pub fn new(alias: &str, metric: Metric, reduce: RunReduce) -> Self {
        Self {
            alias: alias.to_string(),
            metric,
            reduce,
        }
    }
}

fn run_keys() -> [Expr; 3] {
    [col(YEAR), col(SENSITIVITY), col(RUN)]
}

/// Collapse `table` to one row per (Year, Sensitivity, Run) with one column
/// per entry of `metrics`.
pub fn run_level(table: &DataFrame, metrics: &[RunMetric]) -> Result<DataFrame> {
    let scratch: Vec<String> = (0..metrics.len()).map(|i| format!("__metric_{i}")).collect();
    let derived: Vec<Expr> = metrics
        .iter()
        .zip(&scratch)
        .map(|(m, name)| m.metric.expr().alias(name))
        .collect();
    let aggs: Vec<Expr> = metrics
        .iter()
        .zip(&scratch)
        .map(|(m, name)| m.reduce.agg(col(name)).alias(&m.alias))
        .collect();

    table
        .clone()
        .lazy()
        .with_columns(derived)
        .group_by(run_keys())
        .agg(aggs)
        .collect()
        .with_context(|| {
            let names: Vec<&str> = metrics.iter().map(|m| m.alias.as_str()).collect();
            format!("collapsing rows per run for {}", names.join(", "))
        })
}

/// Left join of two run-level frames on (Year, Sensitivity, Run); run keys
/// absent on the right leave its columns null.
pub fn join_run_frames(left: &DataFrame, right: &DataFrame) -> Result<DataFrame> {
    left.left_join(right, [YEAR, SENSITIVITY, RUN], [YEAR, SENSITIVITY, RUN])
        .context("joining run-level frames")
}

/// Add `alias` computed row-wise from columns of a run-level frame.
pub fn derive(frame: &DataFrame, alias: &str, metric: &Metric) -> Result<DataFrame> {
    frame
        .clone()
        .lazy()
        .with_column(metric.expr().alias(alias))
        .collect()
        .with_context(|| format!("deriving {alias}"))
}

/// Summarize `column` of a run-level frame across runs.
pub fn across_runs(
    frame: &DataFrame,
    column: &str,
    statistic: Statistic,
    horizon: Horizon,
    configurations: &[u32],
) -> Result<PlotSeries> {
    let summary = frame
        .clone()
        .lazy()
        .group_by([col(YEAR), col(SENSITIVITY)])
        .agg([statistic.agg(col(column)).alias(VALUE)])
        .select([
            col(YEAR).cast(DataType::Int64),
            col(SENSITIVITY).cast(DataType::Int64),
            col(VALUE).cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("computing {statistic} of {column} across runs"))?;

    let years = summary.column(YEAR)?.i64()?;
    let ids = summary.column(SENSITIVITY)?.i64()?;
    let values = summary.column(VALUE)?.f64()?;

    let mut series = PlotSeries::empty(horizon, configurations);
    for ((year, id), value) in years.into_iter().zip(ids).zip(values) {
        if let (Some(year), Some(id), Some(value)) = (year, id, value) {
            if let Ok(id) = u32::try_from(id) {
                series.insert(year, id, value);
            }
        }
    }
    Ok(series)
}

/// [`run_level`] followed by [`across_runs`] for a single metric.
pub fn summarize(
    table: &DataFrame,
    metric: Metric,
    reduce: RunReduce,
    statistic: Statistic,
    horizon: Horizon,
    configurations: &[u32],
) -> Result<PlotSeries> {
    let frame = run_level(table, &[RunMetric::new(VALUE, metric, reduce)])?;
    across_runs(&frame, VALUE, statistic, horizon, configurations)
}
