use std::ops::Range;

/// Simulated years covered by every result table.
pub const HORIZON_YEARS: usize = 80;
pub const DEFAULT_BASE_YEAR: i32 = 2020;

/// Maps simulation year indices (`0..years`) to calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    base_year: i32,
    years: usize,
}

impl Horizon {
    pub fn new(base_year: i32) -> Self {
        Self {
            base_year,
            years: HORIZON_YEARS,
        }
    }

    pub fn with_years(base_year: i32, years: usize) -> Self {
        Self { base_year, years }
    }

    pub fn base_year(&self) -> i32 {
        self.base_year
    }

    pub fn years(&self) -> usize {
        self.years
    }

    pub fn calendar_year(&self, index: usize) -> i32 {
        self.base_year + index as i32
    }

    /// Index of a simulation year, or `None` outside the horizon.
    pub fn index_of(&self, year: i64) -> Option<usize> {
        usize::try_from(year).ok().filter(|idx| *idx < self.years)
    }

    pub fn calendar_range(&self) -> Range<i32> {
        self.base_year..self.base_year + self.years as i32
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_YEAR)
    }
}
