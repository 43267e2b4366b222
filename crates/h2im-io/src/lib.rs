#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod layout;
pub mod tables;

pub use layout::{check_against_settings, discover_layout, ResultLayout, RunDir};
pub use tables::{load_tables, read_result_file, ResultTables};
