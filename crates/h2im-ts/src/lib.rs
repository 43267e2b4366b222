pub mod aggregate;
pub mod metric;
pub mod series;

pub use aggregate::{
    across_runs, derive, join_run_frames, run_level, summarize, RunMetric, RunReduce, Statistic,
};
pub use metric::Metric;
pub use series::PlotSeries;
