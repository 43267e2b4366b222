use polars::prelude::*;

/// A value computed row by row before any aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    Column(String),
    /// `a / b`; a zero denominator yields null
    Ratio(String, String),
    Product(String, String),
    Difference(String, String),
}

impl Metric {
    pub fn column(name: &str) -> Self {
        Metric::Column(name.to_string())
    }

    pub fn ratio(numerator: &str, denominator: &str) -> Self {
        Metric::Ratio(numerator.to_string(), denominator.to_string())
    }

    pub fn product(a: &str, b: &str) -> Self {
        Metric::Product(a.to_string(), b.to_string())
    }

    pub fn difference(a: &str, b: &str) -> Self {
        Metric::Difference(a.to_string(), b.to_string())
    }

    pub fn expr(&self) -> Expr {
        match self {
            Metric::Column(a) => col(a),
            Metric::Ratio(a, b) => when(col(b).eq(lit(0.0)))
                .then(lit(NULL))
                .otherwise(col(a) / col(b)),
            Metric::Product(a, b) => col(a) * col(b),
            Metric::Difference(a, b) => col(a) - col(b),
        }
    }
}
