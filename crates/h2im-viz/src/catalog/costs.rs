use anyhow::Result;
use h2im_core::schema::columns::*;
use h2im_core::ResultFile;
use h2im_ts::{Metric, PlotSeries, RunReduce, Statistic};

use super::PlotContext;
use crate::figure::Figure;

/// Capacity-weighted mean of an asset column; a year whose assets all have
/// zero capacity stays missing.
fn capacity_weighted(ctx: &PlotContext, file: ResultFile, column: &str) -> Result<PlotSeries> {
    ctx.summarize(
        file,
        Metric::column(column),
        RunReduce::weighted_by(CAPACITY),
        Statistic::Median,
    )
}

fn age(ctx: &PlotContext, name: &'static str, title: &str, file: ResultFile) -> Result<Figure> {
    let weighted = capacity_weighted(ctx, file, AGE)?;
    let median = ctx.summarize(
        file,
        Metric::column(AGE),
        RunReduce::Median,
        Statistic::Median,
    )?;
    let oldest = ctx.summarize(file, Metric::column(AGE), RunReduce::Max, Statistic::Median)?;
    Ok(Figure::lines(name, title, "Years")
        .with_series("Capacity-weighted mean", weighted)
        .with_series("Median asset", median)
        .with_series("Oldest asset", oldest))
}

pub fn powerplant_age(ctx: &PlotContext) -> Result<Figure> {
    age(ctx, "powerplant_age", "Power plant age", ResultFile::Powerplants)
}

pub fn electrolyzer_age(ctx: &PlotContext) -> Result<Figure> {
    age(
        ctx,
        "electrolyzer_age",
        "Electrolyzer age",
        ResultFile::Electrolyzers,
    )
}

pub fn lcoe(ctx: &PlotContext) -> Result<Figure> {
    let weighted = capacity_weighted(ctx, ResultFile::Powerplants, LCOE)?;
    let plain = ctx.summarize(
        ResultFile::Powerplants,
        Metric::column(LCOE),
        RunReduce::Mean,
        Statistic::Median,
    )?;
    let price = ctx.summarize(
        ResultFile::PowerMarketDaily,
        Metric::column(POWER_PRICE),
        RunReduce::Mean,
        Statistic::Median,
    )?;
    Ok(
        Figure::lines("lcoe", "Levelized cost of electricity", "EUR/MWh")
            .with_series("LCOE (capacity-weighted)", weighted)
            .with_series("LCOE (plant mean)", plain)
            .with_series("Electricity price", price),
    )
}

pub fn lcoh(ctx: &PlotContext) -> Result<Figure> {
    let weighted = capacity_weighted(ctx, ResultFile::Electrolyzers, LCOH)?;
    let plain = ctx.summarize(
        ResultFile::Electrolyzers,
        Metric::column(LCOH),
        RunReduce::Mean,
        Statistic::Median,
    )?;
    let price = ctx.summarize(
        ResultFile::HydrogenMarketDaily,
        Metric::column(HYDROGEN_PRICE),
        RunReduce::Mean,
        Statistic::Median,
    )?;
    Ok(
        Figure::lines("lcoh", "Levelized cost of hydrogen", "EUR/kg")
            .with_series("LCOH (capacity-weighted)", weighted)
            .with_series("LCOH (electrolyzer mean)", plain)
            .with_series("Hydrogen price", price),
    )
}

pub fn utilization(ctx: &PlotContext) -> Result<Figure> {
    Ok(
        Figure::lines("utilization", "Capacity-weighted utilization", "Share")
            .with_series(
                "Power plants",
                capacity_weighted(ctx, ResultFile::Powerplants, UTILIZATION)?,
            )
            .with_series(
                "Electrolyzers",
                capacity_weighted(ctx, ResultFile::Electrolyzers, UTILIZATION)?,
            ),
    )
}
