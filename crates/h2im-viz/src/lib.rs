pub mod catalog;
pub mod export;
pub mod figure;
pub mod legend;
pub mod palette;
pub mod render;

pub use catalog::{select_plots, PlotContext, PlotKind};
pub use export::{export_series, series_file_name, series_frame};
pub use figure::{Axis, Figure, FigureKind, FigureSeries};
pub use legend::{parameter_symbol, Labeler};
pub use render::{render_figure, LegendEntries, RenderOptions};
