use anyhow::Result;
use h2im_core::schema::columns::*;
use h2im_core::ResultFile;
use h2im_ts::{Metric, PlotSeries, RunMetric, RunReduce, Statistic};

use super::PlotContext;
use crate::figure::Figure;

fn fleet_capacity(ctx: &PlotContext, file: ResultFile) -> Result<PlotSeries> {
    ctx.summarize(
        file,
        Metric::column(CAPACITY),
        RunReduce::Sum,
        Statistic::Mean,
    )
}

pub fn power_capacity(ctx: &PlotContext) -> Result<Figure> {
    let fleet = fleet_capacity(ctx, ResultFile::Powerplants)?;
    let owned = ctx.summarize(
        ResultFile::PowerProducers,
        Metric::column(INSTALLED_CAPACITY),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    Ok(
        Figure::lines("power_capacity", "Installed generation capacity", "MW")
            .with_series("Power plants", fleet)
            .with_series("Reported by producers", owned),
    )
}

pub fn electrolyzer_capacity(ctx: &PlotContext) -> Result<Figure> {
    let fleet = fleet_capacity(ctx, ResultFile::Electrolyzers)?;
    let owned = ctx.summarize(
        ResultFile::HydrogenProducers,
        Metric::column(INSTALLED_CAPACITY),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    Ok(
        Figure::lines("electrolyzer_capacity", "Installed electrolyzer capacity", "MW")
            .with_series("Electrolyzers", fleet)
            .with_series("Reported by producers", owned),
    )
}

pub fn capacity_mix(ctx: &PlotContext) -> Result<Figure> {
    Ok(Figure::stacked("capacity_mix", "Capacity mix", "MW")
        .with_series("Power plants", fleet_capacity(ctx, ResultFile::Powerplants)?)
        .with_series("Electrolyzers", fleet_capacity(ctx, ResultFile::Electrolyzers)?))
}

pub fn capacity_per_agent(ctx: &PlotContext) -> Result<Figure> {
    let mut figure = Figure::lines("capacity_per_agent", "Capacity per producer", "MW");
    for (label, producers, market, count) in [
        (
            "Power producers",
            ResultFile::PowerProducers,
            ResultFile::PowerMarketYearly,
            NO_POWERPRODUCERS,
        ),
        (
            "Hydrogen producers",
            ResultFile::HydrogenProducers,
            ResultFile::HydrogenMarketYearly,
            NO_HYDROGENPRODUCERS,
        ),
    ] {
        let series = ctx.run_ratio(
            (
                producers,
                RunMetric::new(
                    "capacity",
                    Metric::column(INSTALLED_CAPACITY),
                    RunReduce::Sum,
                ),
            ),
            (
                market,
                RunMetric::new("agents", Metric::column(count), RunReduce::Mean),
            ),
            Statistic::Median,
        )?;
        figure = figure.with_series(label, series);
    }
    Ok(figure)
}
