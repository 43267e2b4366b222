use anyhow::Result;
use h2im_core::schema::columns::*;
use h2im_core::ResultFile;
use h2im_ts::{Metric, PlotSeries, RunMetric, RunReduce, Statistic};

use super::PlotContext;
use crate::figure::Figure;

fn yearly_count(ctx: &PlotContext, file: ResultFile, column: &str) -> Result<PlotSeries> {
    ctx.summarize(
        file,
        Metric::column(column),
        RunReduce::Mean,
        Statistic::Mean,
    )
}

/// Run total of `column` over the agents of `producers`, divided by the
/// agent count the market reports for the same year.
fn per_agent(
    ctx: &PlotContext,
    producers: ResultFile,
    column: &str,
    market: ResultFile,
    count: &str,
) -> Result<PlotSeries> {
    ctx.run_ratio(
        (
            producers,
            RunMetric::new("total", Metric::column(column), RunReduce::Sum),
        ),
        (
            market,
            RunMetric::new("agents", Metric::column(count), RunReduce::Mean),
        ),
        Statistic::Median,
    )
}

fn ratio_of_sums(
    ctx: &PlotContext,
    file: ResultFile,
    numerator: &str,
    denominator: &str,
) -> Result<PlotSeries> {
    ctx.run_ratio(
        (
            file,
            RunMetric::new("numerator", Metric::column(numerator), RunReduce::Sum),
        ),
        (
            file,
            RunMetric::new("denominator", Metric::column(denominator), RunReduce::Sum),
        ),
        Statistic::Median,
    )
}

pub fn agents(ctx: &PlotContext) -> Result<Figure> {
    Ok(Figure::lines("agents", "Active agents", "Agents")
        .with_series(
            "Power producers",
            yearly_count(ctx, ResultFile::PowerMarketYearly, NO_POWERPRODUCERS)?,
        )
        .with_series(
            "Hydrogen producers",
            yearly_count(ctx, ResultFile::HydrogenMarketYearly, NO_HYDROGENPRODUCERS)?,
        )
        .with_series(
            "Manufacturers",
            yearly_count(ctx, ResultFile::ElectrolyzerMarket, NO_MANUFACTURERS)?,
        ))
}

pub fn assets(ctx: &PlotContext) -> Result<Figure> {
    Ok(Figure::lines("assets", "Operating assets", "Assets")
        .with_series(
            "Power plants",
            yearly_count(ctx, ResultFile::PowerMarketYearly, NO_POWERPLANTS)?,
        )
        .with_series(
            "Electrolyzers",
            yearly_count(ctx, ResultFile::HydrogenMarketYearly, NO_ELECTROLYZERS)?,
        ))
}

pub fn investments_per_agent(ctx: &PlotContext) -> Result<Figure> {
    let power = per_agent(
        ctx,
        ResultFile::PowerProducers,
        INVESTMENTS,
        ResultFile::PowerMarketYearly,
        NO_POWERPRODUCERS,
    )?;
    let hydrogen = per_agent(
        ctx,
        ResultFile::HydrogenProducers,
        INVESTMENTS,
        ResultFile::HydrogenMarketYearly,
        NO_HYDROGENPRODUCERS,
    )?;
    Ok(
        Figure::lines("investments_per_agent", "Investments per agent", "EUR")
            .with_series("Power producers", power)
            .with_series("Hydrogen producers", hydrogen),
    )
}

pub fn producer_cash(ctx: &PlotContext) -> Result<Figure> {
    let mut figure = Figure::lines("producer_cash", "Median agent cash", "EUR");
    for (label, file) in [
        ("Power producers", ResultFile::PowerProducers),
        ("Hydrogen producers", ResultFile::HydrogenProducers),
        ("Manufacturers", ResultFile::Manufacturers),
    ] {
        let cash = ctx.summarize(
            file,
            Metric::column(CASH),
            RunReduce::Median,
            Statistic::Median,
        )?;
        figure = figure.with_series(label, cash);
    }
    Ok(figure)
}

pub fn producer_profit(ctx: &PlotContext) -> Result<Figure> {
    let mut figure = Figure::lines("producer_profit", "Mean agent profit", "EUR");
    for (label, file) in [
        ("Power producers", ResultFile::PowerProducers),
        ("Hydrogen producers", ResultFile::HydrogenProducers),
        ("Manufacturers", ResultFile::Manufacturers),
    ] {
        let profit = ctx.summarize(
            file,
            Metric::column(PROFIT),
            RunReduce::Mean,
            Statistic::Mean,
        )?;
        figure = figure.with_series(label, profit);
    }
    Ok(figure)
}

/// Total profit per unit of installed capacity.
pub fn profitability(ctx: &PlotContext) -> Result<Figure> {
    let power = ratio_of_sums(ctx, ResultFile::PowerProducers, PROFIT, INSTALLED_CAPACITY)?;
    let hydrogen = ratio_of_sums(
        ctx,
        ResultFile::HydrogenProducers,
        PROFIT,
        INSTALLED_CAPACITY,
    )?;
    Ok(
        Figure::lines("profitability", "Profit per installed capacity", "EUR/MW")
            .with_series("Power producers", power)
            .with_series("Hydrogen producers", hydrogen),
    )
}

pub fn manufacturing(ctx: &PlotContext) -> Result<Figure> {
    let production = ctx.summarize(
        ResultFile::Manufacturers,
        Metric::column(PRODUCTION),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    let capacity = ctx.summarize(
        ResultFile::Manufacturers,
        Metric::column(MANUFACTURING_CAPACITY),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    Ok(
        Figure::lines("manufacturing", "Electrolyzer manufacturing", "MW")
            .with_series("Production", production)
            .with_series("Capacity", capacity),
    )
}

pub fn manufacturing_utilization(ctx: &PlotContext) -> Result<Figure> {
    let utilization = ratio_of_sums(
        ctx,
        ResultFile::Manufacturers,
        PRODUCTION,
        MANUFACTURING_CAPACITY,
    )?;
    Ok(Figure::lines(
        "manufacturing_utilization",
        "Manufacturing utilization",
        "Share of capacity",
    )
    .with_series("Production / capacity", utilization))
}
