use anyhow::Result;
use h2im_core::schema::columns::*;
use h2im_core::ResultFile;
use h2im_ts::{Metric, RunReduce, Statistic};

use super::PlotContext;
use crate::figure::Figure;

pub fn power_price(ctx: &PlotContext) -> Result<Figure> {
    let price = ctx.summarize(
        ResultFile::PowerMarketDaily,
        Metric::column(POWER_PRICE),
        RunReduce::Mean,
        Statistic::Median,
    )?;
    let peak = ctx.summarize(
        ResultFile::PowerMarketDaily,
        Metric::column(POWER_PRICE),
        RunReduce::Max,
        Statistic::Median,
    )?;
    Ok(
        Figure::lines("power_price", "Electricity price", "EUR/MWh")
            .with_series("Mean daily price", price)
            .with_series("Peak daily price", peak),
    )
}

pub fn hydrogen_price(ctx: &PlotContext) -> Result<Figure> {
    let price = ctx.summarize(
        ResultFile::HydrogenMarketDaily,
        Metric::column(HYDROGEN_PRICE),
        RunReduce::Mean,
        Statistic::Median,
    )?;
    let peak = ctx.summarize(
        ResultFile::HydrogenMarketDaily,
        Metric::column(HYDROGEN_PRICE),
        RunReduce::Max,
        Statistic::Median,
    )?;
    Ok(
        Figure::lines("hydrogen_price", "Hydrogen price", "EUR/kg")
            .with_series("Mean daily price", price)
            .with_series("Peak daily price", peak),
    )
}

pub fn electrolyzer_price(ctx: &PlotContext) -> Result<Figure> {
    let list = ctx.summarize(
        ResultFile::ElectrolyzerMarket,
        Metric::column(ELECTROLYZER_PRICE),
        RunReduce::Mean,
        Statistic::Mean,
    )?;
    // Realized price, weighted by the capacity in each sale.
    let realized = ctx.summarize(
        ResultFile::ElectrolyzerSales,
        Metric::column(SALES_PRICE),
        RunReduce::weighted_by(CAPACITY_SOLD),
        Statistic::Mean,
    )?;
    Ok(
        Figure::lines("electrolyzer_price", "Electrolyzer price", "EUR/kW")
            .with_series("Market price", list)
            .with_series("Realized sales price", realized),
    )
}

pub fn power_volume(ctx: &PlotContext) -> Result<Figure> {
    let demand = ctx.summarize(
        ResultFile::PowerMarketYearly,
        Metric::column(POWER_DEMAND),
        RunReduce::Mean,
        Statistic::Mean,
    )?;
    let supply = ctx.summarize(
        ResultFile::PowerMarketYearly,
        Metric::column(POWER_SUPPLY),
        RunReduce::Mean,
        Statistic::Mean,
    )?;
    Ok(Figure::lines("power_volume", "Electricity traded", "MWh")
        .with_series("Demand", demand)
        .with_series("Supply", supply))
}

pub fn hydrogen_volume(ctx: &PlotContext) -> Result<Figure> {
    let demand = ctx.summarize(
        ResultFile::HydrogenMarketYearly,
        Metric::column(HYDROGEN_DEMAND),
        RunReduce::Mean,
        Statistic::Mean,
    )?;
    let supply = ctx.summarize(
        ResultFile::HydrogenMarketYearly,
        Metric::column(HYDROGEN_SUPPLY),
        RunReduce::Mean,
        Statistic::Mean,
    )?;
    Ok(Figure::lines("hydrogen_volume", "Hydrogen traded", "kg")
        .with_series("Demand", demand)
        .with_series("Supply", supply))
}

/// Yearly sum of daily excess supply, power on the left, hydrogen on the right.
pub fn market_balance(ctx: &PlotContext) -> Result<Figure> {
    let power = ctx.summarize(
        ResultFile::PowerMarketDaily,
        Metric::difference(POWER_SUPPLY, POWER_DEMAND),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    let hydrogen = ctx.summarize(
        ResultFile::HydrogenMarketDaily,
        Metric::difference(HYDROGEN_SUPPLY, HYDROGEN_DEMAND),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    Ok(Figure::twin(
        "market_balance",
        "Excess supply",
        "Electricity (MWh)",
        "Hydrogen (kg)",
    )
    .with_series("Electricity", power)
    .with_secondary("Hydrogen", hydrogen))
}
