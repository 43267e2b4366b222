//! The bespoke plots of a sensitivity study.
//!
//! Each plot owns its aggregation: which tables it reads, how rows collapse
//! within a run and which statistic summarizes runs. [`PlotKind::build`]
//! dispatches to the plot's function.

mod agents;
mod capacity;
mod costs;
mod markets;
mod sales;

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use h2im_core::{Horizon, ResultFile, SensitivitySettings};
use h2im_io::ResultTables;
use h2im_ts::{across_runs, derive, join_run_frames, run_level, summarize};
use h2im_ts::{Metric, PlotSeries, RunMetric, RunReduce, Statistic};
use polars::prelude::DataFrame;

use crate::figure::Figure;

/// Everything a plot needs, passed explicitly.
pub struct PlotContext<'a> {
    pub tables: &'a ResultTables,
    pub settings: &'a SensitivitySettings,
    pub horizon: Horizon,
    /// Configuration ids found on disk, ascending
    pub configurations: Vec<u32>,
}

impl<'a> PlotContext<'a> {
    pub fn new(
        tables: &'a ResultTables,
        settings: &'a SensitivitySettings,
        horizon: Horizon,
        configurations: Vec<u32>,
    ) -> Self {
        Self {
            tables,
            settings,
            horizon,
            configurations,
        }
    }

    pub fn table(&self, file: ResultFile) -> Result<&'a DataFrame> {
        self.tables.get(file)
    }

    /// One metric of one table, reduced per run then summarized across runs.
    pub fn summarize(
        &self,
        file: ResultFile,
        metric: Metric,
        reduce: RunReduce,
        statistic: Statistic,
    ) -> Result<PlotSeries> {
        summarize(
            self.table(file)?,
            metric,
            reduce,
            statistic,
            self.horizon,
            &self.configurations,
        )
    }

    /// Ratio of two run-level aggregates, possibly from different tables,
    /// summarized across runs. A zero denominator leaves the run-year null.
    pub fn run_ratio(
        &self,
        numerator: (ResultFile, RunMetric),
        denominator: (ResultFile, RunMetric),
        statistic: Statistic,
    ) -> Result<PlotSeries> {
        const RATIO: &str = "__ratio";
        let (num_file, num) = numerator;
        let (den_file, den) = denominator;
        let metric = Metric::ratio(&num.alias, &den.alias);

        let frame = if num_file == den_file {
            run_level(self.table(num_file)?, &[num, den])?
        } else {
            let left = run_level(self.table(num_file)?, &[num])?;
            let right = run_level(self.table(den_file)?, &[den])?;
            join_run_frames(&left, &right)?
        };
        let frame = derive(&frame, RATIO, &metric)?;
        across_runs(
            &frame,
            RATIO,
            statistic,
            self.horizon,
            &self.configurations,
        )
    }
}

macro_rules! plot_kinds {
    ($($variant:ident => $name:literal, $build:path;)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PlotKind {
            $($variant,)+
        }

        impl PlotKind {
            pub const ALL: &'static [PlotKind] = &[$(PlotKind::$variant,)+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(PlotKind::$variant => $name,)+
                }
            }

            /// Run this plot's aggregation.
            pub fn build(&self, ctx: &PlotContext) -> Result<Figure> {
                match self {
                    $(PlotKind::$variant => $build(ctx),)+
                }
            }
        }
    };
}

plot_kinds! {
    PowerPrice => "power_price", markets::power_price;
    HydrogenPrice => "hydrogen_price", markets::hydrogen_price;
    ElectrolyzerPrice => "electrolyzer_price", markets::electrolyzer_price;
    PowerVolume => "power_volume", markets::power_volume;
    HydrogenVolume => "hydrogen_volume", markets::hydrogen_volume;
    MarketBalance => "market_balance", markets::market_balance;
    Agents => "agents", agents::agents;
    Assets => "assets", agents::assets;
    InvestmentsPerAgent => "investments_per_agent", agents::investments_per_agent;
    ProducerCash => "producer_cash", agents::producer_cash;
    ProducerProfit => "producer_profit", agents::producer_profit;
    Profitability => "profitability", agents::profitability;
    Manufacturing => "manufacturing", agents::manufacturing;
    ManufacturingUtilization => "manufacturing_utilization", agents::manufacturing_utilization;
    PowerCapacity => "power_capacity", capacity::power_capacity;
    ElectrolyzerCapacity => "electrolyzer_capacity", capacity::electrolyzer_capacity;
    CapacityMix => "capacity_mix", capacity::capacity_mix;
    CapacityPerAgent => "capacity_per_agent", capacity::capacity_per_agent;
    PowerplantAge => "powerplant_age", costs::powerplant_age;
    ElectrolyzerAge => "electrolyzer_age", costs::electrolyzer_age;
    Lcoe => "lcoe", costs::lcoe;
    Lcoh => "lcoh", costs::lcoh;
    Utilization => "utilization", costs::utilization;
    ElectrolyzerSales => "electrolyzer_sales", sales::electrolyzer_sales;
    HydrogenRevenue => "hydrogen_revenue", sales::hydrogen_revenue;
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PlotKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = PlotKind::ALL.iter().map(PlotKind::name).collect();
                anyhow!("unknown plot '{wanted}'; known plots: {}", names.join(", "))
            })
    }
}

/// Parse a comma-separated plot selection; `None` selects every plot.
pub fn select_plots(selection: Option<&str>) -> Result<Vec<PlotKind>> {
    match selection {
        None => Ok(PlotKind::ALL.to_vec()),
        Some(list) => list
            .split(',')
            .filter(|item| !item.trim().is_empty())
            .map(PlotKind::from_str)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h2im_core::schema::columns;
    use h2im_io::discover_layout;
    use h2im_io::fixtures::{write_results_tree, FixtureSpec};
    use std::collections::HashSet;
    use tempfile::tempdir;

    struct Loaded {
        _dir: tempfile::TempDir,
        tables: ResultTables,
        settings: SensitivitySettings,
        configurations: Vec<u32>,
    }

    fn load(spec: FixtureSpec) -> Loaded {
        let dir = tempdir().unwrap();
        write_results_tree(dir.path(), &spec).unwrap();
        let layout = discover_layout(dir.path()).unwrap();
        let tables = ResultTables::load(&layout).unwrap();
        let settings = SensitivitySettings::from_dir(dir.path()).unwrap();
        let configurations = layout.configuration_ids();
        Loaded {
            _dir: dir,
            tables,
            settings,
            configurations,
        }
    }

    fn context(loaded: &Loaded) -> PlotContext<'_> {
        PlotContext::new(
            &loaded.tables,
            &loaded.settings,
            Horizon::default(),
            loaded.configurations.clone(),
        )
    }

    #[test]
    fn catalog_names_are_unique_and_parse_back() {
        assert_eq!(PlotKind::ALL.len(), 25);
        let names: HashSet<&str> = PlotKind::ALL.iter().map(PlotKind::name).collect();
        assert_eq!(names.len(), PlotKind::ALL.len());
        for kind in PlotKind::ALL {
            assert_eq!(kind.name().parse::<PlotKind>().unwrap(), *kind);
        }
        assert!("duration_curve".parse::<PlotKind>().is_err());
    }

    #[test]
    fn selection_parses_comma_lists() {
        let kinds = select_plots(Some("agents, lcoe,")).unwrap();
        assert_eq!(kinds, vec![PlotKind::Agents, PlotKind::Lcoe]);
        assert_eq!(select_plots(None).unwrap().len(), 25);
        assert!(select_plots(Some("agents,nope")).is_err());
    }

    #[test]
    fn every_plot_builds_on_a_complete_tree() {
        let loaded = load(FixtureSpec::generated(2, 2));
        let ctx = context(&loaded);
        for kind in PlotKind::ALL {
            let figure = kind.build(&ctx).unwrap();
            assert_eq!(figure.name, kind.name());
            assert!(!figure.series.is_empty(), "{kind} has no series");
            let labels: HashSet<&str> = figure.series.iter().map(|s| s.label.as_str()).collect();
            assert_eq!(labels.len(), figure.series.len(), "{kind} repeats a label");
            assert_eq!(figure.configurations(), vec![1, 2], "{kind}");
        }
    }

    #[test]
    fn constant_agent_counts_plot_flat() {
        let loaded = load(FixtureSpec::constant(2, 3, 5.0));
        let figure = PlotKind::Agents.build(&context(&loaded)).unwrap();
        for series in &figure.series {
            for configuration in [1, 2] {
                let points = series.data.points(configuration);
                assert_eq!(points.len(), 5);
                assert!(points.iter().all(|(_, v)| *v == 5.0));
            }
        }
    }

    #[test]
    fn per_agent_ratio_joins_two_tables() {
        // 3 producers invest 5 each; the market reports 5 producers.
        let loaded = load(FixtureSpec::constant(1, 2, 5.0));
        let ctx = context(&loaded);
        let series = ctx
            .run_ratio(
                (
                    ResultFile::PowerProducers,
                    RunMetric::new("inv", Metric::column(columns::INVESTMENTS), RunReduce::Sum),
                ),
                (
                    ResultFile::PowerMarketYearly,
                    RunMetric::new(
                        "n",
                        Metric::column(columns::NO_POWERPRODUCERS),
                        RunReduce::Mean,
                    ),
                ),
                Statistic::Median,
            )
            .unwrap();
        assert_eq!(series.get(0, 1), Some(3.0));
        assert_eq!(series.get(4, 1), Some(3.0));
        assert_eq!(series.get(5, 1), None);
    }

    #[test]
    fn zero_counts_leave_ratio_missing() {
        let loaded = load(FixtureSpec::constant(1, 1, 0.0));
        let figure = PlotKind::InvestmentsPerAgent
            .build(&context(&loaded))
            .unwrap();
        assert!(figure.series.iter().all(|s| s.data.is_empty()));
    }
}
