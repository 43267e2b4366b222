use anyhow::{anyhow, Result};
use h2im_core::{Horizon, ImageFormat};
use h2im_ts::PlotSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    Lines,
    StackedArea,
    /// Primary series on the left axis, secondary on the right
    TwinAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone)]
pub struct FigureSeries {
    pub label: String,
    pub axis: Axis,
    pub data: PlotSeries,
}

/// Aggregated content of one chart, independent of how it is drawn.
#[derive(Debug, Clone)]
pub struct Figure {
    pub name: &'static str,
    pub title: String,
    pub y_label: String,
    pub secondary_label: Option<String>,
    pub kind: FigureKind,
    pub series: Vec<FigureSeries>,
}

impl Figure {
    fn new(name: &'static str, title: &str, y_label: &str, kind: FigureKind) -> Self {
        Self {
            name,
            title: title.to_string(),
            y_label: y_label.to_string(),
            secondary_label: None,
            kind,
            series: Vec::new(),
        }
    }

    pub fn lines(name: &'static str, title: &str, y_label: &str) -> Self {
        Self::new(name, title, y_label, FigureKind::Lines)
    }

    pub fn stacked(name: &'static str, title: &str, y_label: &str) -> Self {
        Self::new(name, title, y_label, FigureKind::StackedArea)
    }

    pub fn twin(name: &'static str, title: &str, y_label: &str, secondary_label: &str) -> Self {
        let mut figure = Self::new(name, title, y_label, FigureKind::TwinAxis);
        figure.secondary_label = Some(secondary_label.to_string());
        figure
    }

    pub fn with_series(mut self, label: &str, data: PlotSeries) -> Self {
        self.series.push(FigureSeries {
            label: label.to_string(),
            axis: Axis::Primary,
            data,
        });
        self
    }

    pub fn with_secondary(mut self, label: &str, data: PlotSeries) -> Self {
        self.series.push(FigureSeries {
            label: label.to_string(),
            axis: Axis::Secondary,
            data,
        });
        self
    }

    /// `plot_<name>.<ext>`
    pub fn file_name(&self, format: ImageFormat) -> String {
        format!("plot_{}.{}", self.name, format.extension())
    }

    pub fn horizon(&self) -> Result<Horizon> {
        self.series
            .first()
            .map(|s| s.data.horizon())
            .ok_or_else(|| anyhow!("figure {} has no series", self.name))
    }

    /// Union of the configurations present in any series, ascending.
    pub fn configurations(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .series
            .iter()
            .flat_map(|s| s.data.configurations())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn axis_series(&self, axis: Axis) -> impl Iterator<Item = &FigureSeries> {
        self.series.iter().filter(move |s| s.axis == axis)
    }

    pub fn axis_range(&self, axis: Axis) -> Option<(f64, f64)> {
        self.axis_series(axis)
            .filter_map(|s| s.data.value_range())
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }

    /// Cumulative layers for stacked areas: layer `k` is the sum of series
    /// `0..=k`.
    pub fn stacked_layers(&self) -> Result<Vec<PlotSeries>> {
        let horizon = self.horizon()?;
        let mut layers: Vec<PlotSeries> = Vec::with_capacity(self.series.len());
        for series in &self.series {
            let layer = match layers.last() {
                Some(below) => PlotSeries::sum(horizon, &[below, &series.data]),
                None => series.data.clone(),
            };
            layers.push(layer);
        }
        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[(i64, u32, f64)]) -> PlotSeries {
        let mut s = PlotSeries::empty(Horizon::with_years(2020, 3), &[]);
        for (year, config, value) in values {
            s.insert(*year, *config, *value);
        }
        s
    }

    #[test]
    fn file_name_uses_plot_prefix() {
        let figure = Figure::lines("agents", "Agents", "count");
        assert_eq!(figure.file_name(ImageFormat::Png), "plot_agents.png");
        assert_eq!(figure.file_name(ImageFormat::Svg), "plot_agents.svg");
    }

    #[test]
    fn ranges_are_split_by_axis() {
        let figure = Figure::twin("sales", "Sales", "units", "price")
            .with_series("units", series(&[(0, 1, 2.0), (1, 1, 4.0)]))
            .with_secondary("price", series(&[(0, 2, 100.0)]));
        assert_eq!(figure.axis_range(Axis::Primary), Some((2.0, 4.0)));
        assert_eq!(figure.axis_range(Axis::Secondary), Some((100.0, 100.0)));
        assert_eq!(figure.configurations(), vec![1, 2]);
    }

    #[test]
    fn stacked_layers_accumulate() {
        let figure = Figure::stacked("mix", "Mix", "MW")
            .with_series("a", series(&[(0, 1, 1.0)]))
            .with_series("b", series(&[(0, 1, 2.0), (1, 1, 3.0)]));
        let layers = figure.stacked_layers().unwrap();
        assert_eq!(layers[0].get(0, 1), Some(1.0));
        assert_eq!(layers[1].get(0, 1), Some(3.0));
        assert_eq!(layers[1].get(1, 1), Some(3.0));
    }

    #[test]
    fn empty_figure_has_no_horizon() {
        assert!(Figure::lines("x", "x", "x").horizon().is_err());
    }
}
