//! Names of the result files and the columns the plots read from them.

use std::fmt;

pub const YEAR: &str = "Year";
pub const DAY: &str = "Day";
/// Derived column holding the run id parsed from `Run_<id>`.
pub const RUN: &str = "Run";
/// Derived column holding the configuration id parsed from `Sensitivity_<id>`.
pub const SENSITIVITY: &str = "Sensitivity";

pub mod columns {
    pub const POWER_PRICE: &str = "Power Price";
    pub const POWER_DEMAND: &str = "Power Demand";
    pub const POWER_SUPPLY: &str = "Power Supply";
    pub const NO_POWERPRODUCERS: &str = "No. of Powerproducers";
    pub const NO_POWERPLANTS: &str = "No. of Powerplants";

    pub const HYDROGEN_PRICE: &str = "Hydrogen Price";
    pub const HYDROGEN_DEMAND: &str = "Hydrogen Demand";
    pub const HYDROGEN_SUPPLY: &str = "Hydrogen Supply";
    pub const NO_HYDROGENPRODUCERS: &str = "No. of Hydrogenproducers";
    pub const NO_ELECTROLYZERS: &str = "No. of Electrolyzers";

    pub const ELECTROLYZER_PRICE: &str = "Electrolyzer Price";
    pub const ELECTROLYZERS_SOLD: &str = "Electrolyzers Sold";
    pub const NO_MANUFACTURERS: &str = "No. of Manufacturers";

    pub const INVESTMENTS: &str = "Investments";
    pub const AGENT: &str = "Agent";
    pub const CASH: &str = "Cash";
    pub const PROFIT: &str = "Profit";
    pub const INSTALLED_CAPACITY: &str = "Installed Capacity";
    pub const PRODUCTION: &str = "Production";
    pub const MANUFACTURING_CAPACITY: &str = "Manufacturing Capacity";

    pub const PLANT: &str = "Plant";
    pub const CAPACITY: &str = "Capacity";
    pub const AGE: &str = "Age";
    pub const LCOE: &str = "LCOE";
    pub const LCOH: &str = "LCOH";
    pub const UTILIZATION: &str = "Utilization";

    pub const UNITS_SOLD: &str = "Units Sold";
    pub const CAPACITY_SOLD: &str = "Capacity Sold";
    pub const SALES_PRICE: &str = "Sales Price";
    pub const HYDROGEN_SOLD: &str = "Hydrogen Sold";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Yearly,
    Daily,
}

/// The twelve tables every run directory must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResultFile {
    PowerMarketYearly,
    PowerMarketDaily,
    HydrogenMarketYearly,
    HydrogenMarketDaily,
    ElectrolyzerMarket,
    PowerProducers,
    HydrogenProducers,
    Manufacturers,
    Powerplants,
    Electrolyzers,
    ElectrolyzerSales,
    HydrogenSales,
}

impl ResultFile {
    pub const ALL: [ResultFile; 12] = [
        ResultFile::PowerMarketYearly,
        ResultFile::PowerMarketDaily,
        ResultFile::HydrogenMarketYearly,
        ResultFile::HydrogenMarketDaily,
        ResultFile::ElectrolyzerMarket,
        ResultFile::PowerProducers,
        ResultFile::HydrogenProducers,
        ResultFile::Manufacturers,
        ResultFile::Powerplants,
        ResultFile::Electrolyzers,
        ResultFile::ElectrolyzerSales,
        ResultFile::HydrogenSales,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ResultFile::PowerMarketYearly => "Powermarket_Yearly.csv",
            ResultFile::PowerMarketDaily => "Powermarket_Daily.csv",
            ResultFile::HydrogenMarketYearly => "Hydrogenmarket_Yearly.csv",
            ResultFile::HydrogenMarketDaily => "Hydrogenmarket_Daily.csv",
            ResultFile::ElectrolyzerMarket => "Electrolyzermarket_Yearly.csv",
            ResultFile::PowerProducers => "Powerproducers.csv",
            ResultFile::HydrogenProducers => "Hydrogenproducers.csv",
            ResultFile::Manufacturers => "Manufacturers.csv",
            ResultFile::Powerplants => "Powerplants.csv",
            ResultFile::Electrolyzers => "Electrolyzers.csv",
            ResultFile::ElectrolyzerSales => "Electrolyzer_Sales.csv",
            ResultFile::HydrogenSales => "Hydrogen_Sales.csv",
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            ResultFile::PowerMarketDaily
            | ResultFile::HydrogenMarketDaily
            | ResultFile::ElectrolyzerSales
            | ResultFile::HydrogenSales => Granularity::Daily,
            _ => Granularity::Yearly,
        }
    }

    /// Key columns the file must carry besides its metrics.
    pub fn key_columns(&self) -> &'static [&'static str] {
        match self.granularity() {
            Granularity::Yearly => &[YEAR],
            Granularity::Daily => &[YEAR, DAY],
        }
    }

    /// Metric columns the simulation writes for this table.
    pub fn metric_columns(&self) -> &'static [&'static str] {
        use columns::*;
        match self {
            ResultFile::PowerMarketYearly => &[
                POWER_PRICE,
                POWER_DEMAND,
                POWER_SUPPLY,
                NO_POWERPRODUCERS,
                NO_POWERPLANTS,
                INVESTMENTS,
            ],
            ResultFile::PowerMarketDaily => &[POWER_PRICE, POWER_DEMAND, POWER_SUPPLY],
            ResultFile::HydrogenMarketYearly => &[
                HYDROGEN_PRICE,
                HYDROGEN_DEMAND,
                HYDROGEN_SUPPLY,
                NO_HYDROGENPRODUCERS,
                NO_ELECTROLYZERS,
                INVESTMENTS,
            ],
            ResultFile::HydrogenMarketDaily => &[HYDROGEN_PRICE, HYDROGEN_DEMAND, HYDROGEN_SUPPLY],
            ResultFile::ElectrolyzerMarket => {
                &[ELECTROLYZER_PRICE, ELECTROLYZERS_SOLD, NO_MANUFACTURERS]
            }
            ResultFile::PowerProducers | ResultFile::HydrogenProducers => {
                &[AGENT, CASH, PROFIT, INVESTMENTS, INSTALLED_CAPACITY]
            }
            ResultFile::Manufacturers => {
                &[AGENT, CASH, PROFIT, PRODUCTION, MANUFACTURING_CAPACITY]
            }
            ResultFile::Powerplants => &[PLANT, CAPACITY, AGE, LCOE, UTILIZATION],
            ResultFile::Electrolyzers => &[PLANT, CAPACITY, AGE, LCOH, UTILIZATION],
            ResultFile::ElectrolyzerSales => &[UNITS_SOLD, CAPACITY_SOLD, SALES_PRICE],
            ResultFile::HydrogenSales => &[HYDROGEN_SOLD, SALES_PRICE],
        }
    }
}

impl fmt::Display for ResultFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn file_names_are_unique() {
        let names: HashSet<_> = ResultFile::ALL.iter().map(|f| f.file_name()).collect();
        assert_eq!(names.len(), ResultFile::ALL.len());
    }

    #[test]
    fn daily_tables_carry_day_key() {
        assert_eq!(ResultFile::PowerMarketDaily.key_columns(), [YEAR, DAY]);
        assert_eq!(ResultFile::Powerplants.key_columns(), [YEAR]);
    }
}
