pub mod cli;
pub mod manifest;

pub use cli::{Cli, Commands, FormatArg, OutputArgs, SourceArgs};
