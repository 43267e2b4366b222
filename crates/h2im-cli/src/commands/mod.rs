pub mod check;
pub mod list;
pub mod plot;
pub mod series;
mod study;
