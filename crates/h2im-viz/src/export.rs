use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use h2im_core::schema::{SENSITIVITY, YEAR};
use h2im_io::tables::CSV_SEPARATOR;
use polars::prelude::*;
use tracing::info;

use crate::figure::Figure;

pub fn series_file_name(figure: &Figure) -> String {
    format!("series_{}.csv", figure.name)
}

/// Long-format frame of a figure: one row per (configuration, horizon year),
/// one nullable column per series label.
pub fn series_frame(figure: &Figure) -> Result<DataFrame> {
    let horizon = figure.horizon()?;
    let configurations = figure.configurations();

    let mut years: Vec<i64> = Vec::new();
    let mut ids: Vec<i64> = Vec::new();
    for id in &configurations {
        for idx in 0..horizon.years() {
            years.push(i64::from(horizon.calendar_year(idx)));
            ids.push(i64::from(*id));
        }
    }

    let mut columns = vec![Series::new(YEAR, years), Series::new(SENSITIVITY, ids)];
    for series in &figure.series {
        let values: Vec<Option<f64>> = configurations
            .iter()
            .flat_map(|id| (0..horizon.years()).map(move |idx| (idx, *id)))
            .map(|(idx, id)| series.data.get(idx, id))
            .collect();
        columns.push(Series::new(&series.label, values));
    }
    DataFrame::new(columns).with_context(|| format!("assembling series of {}", figure.name))
}

/// Write `series_<name>.csv` into `out_dir`.
pub fn export_series(figure: &Figure, out_dir: &Path) -> Result<PathBuf> {
    let mut frame = series_frame(figure)?;
    let path = out_dir.join(series_file_name(figure));
    let mut file =
        File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .with_separator(CSV_SEPARATOR)
        .finish(&mut frame)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(plot = figure.name, path = %path.display(), rows = frame.height(), "exported series");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use h2im_core::Horizon;
    use h2im_ts::PlotSeries;
    use tempfile::tempdir;

    fn figure() -> Figure {
        let horizon = Horizon::with_years(2020, 3);
        let mut price = PlotSeries::empty(horizon, &[1, 2]);
        price.insert(0, 1, 40.0);
        price.insert(2, 2, 55.5);
        let mut volume = PlotSeries::empty(horizon, &[1, 2]);
        volume.insert(1, 1, 7.0);
        Figure::lines("power_price", "Power price", "EUR/MWh")
            .with_series("Power price", price)
            .with_series("Volume", volume)
    }

    #[test]
    fn frame_has_a_row_per_configuration_year() {
        let frame = series_frame(&figure()).unwrap();
        assert_eq!(frame.height(), 6);
        assert_eq!(
            frame.get_column_names(),
            vec![YEAR, SENSITIVITY, "Power price", "Volume"]
        );
        let price: Vec<Option<f64>> = frame
            .column("Power price")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(price, vec![Some(40.0), None, None, None, None, Some(55.5)]);
    }

    #[test]
    fn export_writes_semicolon_csv() {
        let dir = tempdir().unwrap();
        let path = export_series(&figure(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "series_power_price.csv");
        let text = std::fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Year;Sensitivity;Power price;Volume"));
        assert!(lines.next().unwrap().starts_with("2020;1;40"));
        assert_eq!(text.lines().count(), 7);
    }
}
