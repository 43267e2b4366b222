use std::collections::BTreeMap;

use h2im_core::Horizon;

/// Year-by-configuration summary of one metric.
///
/// Every listed configuration owns one cell per horizon year; `None` marks
/// a missing value (no data, zero denominator, non-finite result).
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    horizon: Horizon,
    cells: BTreeMap<u32, Vec<Option<f64>>>,
}

impl PlotSeries {
    pub fn empty(horizon: Horizon, configurations: &[u32]) -> Self {
        let cells = configurations
            .iter()
            .map(|id| (*id, vec![None; horizon.years()]))
            .collect();
        Self { horizon, cells }
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Store `value` for simulation year `year`. Years outside the horizon
    /// and non-finite values are dropped.
    pub fn insert(&mut self, year: i64, configuration: u32, value: f64) {
        let Some(index) = self.horizon.index_of(year) else {
            return;
        };
        if !value.is_finite() {
            return;
        }
        let years = self.horizon.years();
        let row = self
            .cells
            .entry(configuration)
            .or_insert_with(|| vec![None; years]);
        row[index] = Some(value);
    }

    pub fn get(&self, year: usize, configuration: u32) -> Option<f64> {
        self.cells
            .get(&configuration)
            .and_then(|row| row.get(year).copied().flatten())
    }

    pub fn configurations(&self) -> Vec<u32> {
        self.cells.keys().copied().collect()
    }

    pub fn values(&self, configuration: u32) -> Option<&[Option<f64>]> {
        self.cells.get(&configuration).map(Vec::as_slice)
    }

    /// Present values as (calendar year, value) points.
    pub fn points(&self, configuration: u32) -> Vec<(i32, f64)> {
        self.values(configuration)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.map(|v| (self.horizon.calendar_year(idx), v)))
            .collect()
    }

    /// Contiguous stretches of present values; a missing year breaks the line.
    pub fn segments(&self, configuration: u32) -> Vec<Vec<(i32, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (idx, value) in self
            .values(configuration)
            .unwrap_or_default()
            .iter()
            .enumerate()
        {
            match value {
                Some(v) => current.push((self.horizon.calendar_year(idx), *v)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .values()
            .flatten()
            .flatten()
            .fold(None, |acc, v| match acc {
                None => Some((*v, *v)),
                Some((lo, hi)) => Some((lo.min(*v), hi.max(*v))),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.value_range().is_none()
    }

    /// Cell-wise sum; a cell is present when any input has it.
    pub fn sum(horizon: Horizon, series: &[&PlotSeries]) -> PlotSeries {
        let mut out = PlotSeries::empty(horizon, &[]);
        for s in series {
            for (configuration, row) in &s.cells {
                let years = horizon.years();
                let target = out
                    .cells
                    .entry(*configuration)
                    .or_insert_with(|| vec![None; years]);
                for (slot, value) in target.iter_mut().zip(row) {
                    if let Some(v) = value {
                        *slot = Some(slot.unwrap_or(0.0) + v);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizon() -> Horizon {
        Horizon::with_years(2020, 5)
    }

    #[test]
    fn out_of_horizon_years_are_dropped() {
        let mut series = PlotSeries::empty(horizon(), &[1]);
        series.insert(4, 1, 1.0);
        series.insert(5, 1, 2.0);
        series.insert(-1, 1, 3.0);
        assert_eq!(series.values(1).unwrap().len(), 5);
        assert_eq!(series.get(4, 1), Some(1.0));
        assert_eq!(series.get(5, 1), None);
    }

    #[test]
    fn non_finite_values_are_missing() {
        let mut series = PlotSeries::empty(horizon(), &[1]);
        series.insert(0, 1, f64::INFINITY);
        series.insert(1, 1, f64::NAN);
        assert!(series.is_empty());
    }

    #[test]
    fn segments_break_at_missing_years() {
        let mut series = PlotSeries::empty(horizon(), &[2]);
        series.insert(0, 2, 1.0);
        series.insert(1, 2, 2.0);
        series.insert(3, 2, 4.0);
        assert_eq!(
            series.segments(2),
            vec![vec![(2020, 1.0), (2021, 2.0)], vec![(2023, 4.0)]]
        );
        assert_eq!(series.points(2).len(), 3);
        assert_eq!(series.value_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn unknown_configuration_reads_as_missing() {
        let series = PlotSeries::empty(horizon(), &[1]);
        assert_eq!(series.get(0, 7), None);
        assert!(series.points(7).is_empty());
    }

    #[test]
    fn sum_keeps_partial_cells() {
        let mut a = PlotSeries::empty(horizon(), &[1]);
        let mut b = PlotSeries::empty(horizon(), &[1]);
        a.insert(0, 1, 1.0);
        b.insert(0, 1, 2.0);
        b.insert(1, 1, 5.0);
        let total = PlotSeries::sum(horizon(), &[&a, &b]);
        assert_eq!(total.get(0, 1), Some(3.0));
        assert_eq!(total.get(1, 1), Some(5.0));
        assert_eq!(total.get(2, 1), None);
    }
}
