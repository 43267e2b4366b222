use std::fmt::Display;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use h2im_core::{ImageConfig, ImageFormat};
use plotters::coord::types::{RangedCoordf64, RangedCoordi32};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::figure::{Axis, Figure, FigureKind};
use crate::legend::Labeler;
use crate::palette::{configuration_alpha, series_color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl From<&ImageConfig> for RenderOptions {
    fn from(config: &ImageConfig) -> Self {
        Self {
            format: config.format,
            width: config.width,
            height: config.height,
        }
    }
}

/// Resolved legend text, built before any file is opened so a labeling
/// failure leaves no partial image behind.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntries {
    pub header: String,
    pub configurations: Vec<(u32, String)>,
}

impl LegendEntries {
    pub fn build(figure: &Figure, labeler: &Labeler) -> Result<Self> {
        let header = labeler.header()?;
        let configurations = figure
            .configurations()
            .into_iter()
            .map(|id| Ok((id, labeler.configuration_label(id)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            header,
            configurations,
        })
    }
}

/// Draw `figure` into `out_dir` and return the written path.
pub fn render_figure(
    figure: &Figure,
    labeler: &Labeler,
    options: &RenderOptions,
    out_dir: &Path,
) -> Result<PathBuf> {
    let legend = LegendEntries::build(figure, labeler)?;
    let path = out_dir.join(figure.file_name(options.format));
    let size = (options.width, options.height);
    match options.format {
        ImageFormat::Png => {
            draw(BitMapBackend::new(&path, size).into_drawing_area(), figure, &legend)?
        }
        ImageFormat::Svg => {
            draw(SVGBackend::new(&path, size).into_drawing_area(), figure, &legend)?
        }
    }
    info!(plot = figure.name, path = %path.display(), "rendered figure");
    Ok(path)
}

fn plot_error<E: Display>(err: E) -> anyhow::Error {
    anyhow!("drawing chart: {err}")
}

/// Value range with 5% headroom; flat or empty ranges get a unit span.
pub fn padded_range(range: Option<(f64, f64)>) -> Range<f64> {
    match range {
        None => 0.0..1.0,
        Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => (lo - 1.0)..(hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad)..(hi + pad)
        }
    }
}

fn primary_range(figure: &Figure) -> Result<Range<f64>> {
    match figure.kind {
        FigureKind::StackedArea => {
            let top = figure.stacked_layers()?.last().and_then(|l| l.value_range());
            let range = top.map(|(lo, hi)| (lo.min(0.0), hi.max(0.0)));
            Ok(padded_range(range))
        }
        _ => Ok(padded_range(figure.axis_range(Axis::Primary))),
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
    legend: &LegendEntries,
) -> Result<()> {
    root.fill(&WHITE).map_err(plot_error)?;

    let horizon = figure.horizon()?;
    let x_range = horizon.calendar_range();
    let y_range = primary_range(figure)?;
    let y2_range = padded_range(figure.axis_range(Axis::Secondary));
    let twin = figure.kind == FigureKind::TwinAxis;

    let mut builder = ChartBuilder::on(&root);
    builder
        .caption(&figure.title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70);
    if twin {
        builder.right_y_label_area_size(70);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(plot_error)?
        .set_secondary_coord(x_range, y2_range);

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(figure.y_label.as_str())
        .draw()
        .map_err(plot_error)?;
    if let (true, Some(label)) = (twin, &figure.secondary_label) {
        chart
            .configure_secondary_axes()
            .y_desc(label.as_str())
            .draw()
            .map_err(plot_error)?;
    }

    let configurations: Vec<u32> = legend.configurations.iter().map(|(id, _)| *id).collect();
    let count = configurations.len();

    if figure.kind == FigureKind::StackedArea {
        let layers = figure.stacked_layers()?;
        // Top layer first so lower layers stay visible.
        for (index, (series, layer)) in figure.series.iter().zip(&layers).enumerate().rev() {
            let color = series_color(index);
            for (position, id) in configurations.iter().enumerate() {
                let alpha = configuration_alpha(position, count);
                for segment in layer.segments(*id) {
                    chart
                        .draw_series(
                            AreaSeries::new(segment, 0.0, color.mix(alpha * 0.5).filled())
                                .border_style(color.mix(alpha).stroke_width(2)),
                        )
                        .map_err(plot_error)?;
                }
            }
            metric_legend(&mut *chart, &series.label, color)?;
        }
    } else {
        for (index, series) in figure.series.iter().enumerate() {
            let color = series_color(index);
            for (position, id) in configurations.iter().enumerate() {
                let style = color.mix(configuration_alpha(position, count)).stroke_width(2);
                for segment in series.data.segments(*id) {
                    let drawn = match series.axis {
                        Axis::Primary => chart.draw_series(LineSeries::new(segment, style)),
                        Axis::Secondary => {
                            chart.draw_secondary_series(LineSeries::new(segment, style))
                        }
                    };
                    drawn.map_err(plot_error)?;
                }
            }
            metric_legend(&mut *chart, &series.label, color)?;
        }
    }

    chart
        .draw_series(std::iter::empty::<PathElement<(i32, f64)>>())
        .map_err(plot_error)?
        .label(legend.header.as_str())
        .legend(|(x, y)| EmptyElement::at((x, y)));
    for (position, (_, label)) in legend.configurations.iter().enumerate() {
        let alpha = configuration_alpha(position, count);
        chart
            .draw_series(std::iter::empty::<PathElement<(i32, f64)>>())
            .map_err(plot_error)?
            .label(label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(alpha).stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 14))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Legend entry identifying one metric by its palette color.
fn metric_legend<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordi32, RangedCoordf64>>,
    label: &str,
    color: RGBColor,
) -> Result<()> {
    chart
        .draw_series(std::iter::empty::<PathElement<(i32, f64)>>())
        .map_err(plot_error)?
        .label(label)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
        });
    Ok(())
}
