use anyhow::Result;
use h2im_core::schema::columns::*;
use h2im_core::ResultFile;
use h2im_ts::{Metric, RunReduce, Statistic};

use super::PlotContext;
use crate::figure::Figure;

pub fn electrolyzer_sales(ctx: &PlotContext) -> Result<Figure> {
    let units = ctx.summarize(
        ResultFile::ElectrolyzerSales,
        Metric::column(UNITS_SOLD),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    let capacity = ctx.summarize(
        ResultFile::ElectrolyzerSales,
        Metric::column(CAPACITY_SOLD),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    Ok(Figure::twin(
        "electrolyzer_sales",
        "Electrolyzer sales",
        "Units",
        "Capacity (MW)",
    )
    .with_series("Units sold", units)
    .with_secondary("Capacity sold", capacity))
}

/// Yearly hydrogen revenue (volume times price of each trade) against the
/// volume sold.
pub fn hydrogen_revenue(ctx: &PlotContext) -> Result<Figure> {
    let revenue = ctx.summarize(
        ResultFile::HydrogenSales,
        Metric::product(HYDROGEN_SOLD, SALES_PRICE),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    let volume = ctx.summarize(
        ResultFile::HydrogenSales,
        Metric::column(HYDROGEN_SOLD),
        RunReduce::Sum,
        Statistic::Mean,
    )?;
    Ok(
        Figure::twin("hydrogen_revenue", "Hydrogen sales", "Revenue (EUR)", "Volume (kg)")
            .with_series("Revenue", revenue)
            .with_secondary("Volume sold", volume),
    )
}
