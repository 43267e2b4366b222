//! Shared types for the Hydrogen Investment Model sensitivity plotter:
//! the fatal error set, the `sensitivity.config` parser, the analysis
//! horizon, result-file schema and the plot configuration.

pub mod config;
pub mod error;
pub mod horizon;
pub mod schema;
pub mod settings;

pub use config::{ImageConfig, ImageFormat, LabelPolicy, PlotConfig};
pub use error::{exit_code_for, H2imError, H2imResult};
pub use horizon::{Horizon, DEFAULT_BASE_YEAR, HORIZON_YEARS};
pub use schema::{Granularity, ResultFile};
pub use settings::{Configuration, SensitivitySettings, SENSITIVITY_CONFIG_FILE};
