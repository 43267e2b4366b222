use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use h2im_core::ImageFormat;

#[derive(Parser, Debug)]
#[command(
    name = "h2im",
    author,
    version,
    about = "Plot sensitivity studies of the hydrogen investment model",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every selected plot as an image
    Plot {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Image format; overrides the plot configuration file
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Export the aggregated series of every selected plot as CSV
    Series {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Validate a results tree and summarize its configurations
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the available plots
    List,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Results root holding sensitivity.config and Sensitivity_<id>/Run_<id>
    #[arg(long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory (must exist); defaults to the results root
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub out: Option<PathBuf>,
    /// Plot configuration file (TOML)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Comma-separated plot names (default: all)
    #[arg(long)]
    pub plots: Option<String>,
}

impl OutputArgs {
    pub fn out_dir(&self, source: &SourceArgs) -> PathBuf {
        self.out.clone().unwrap_or_else(|| source.dir.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for ImageFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Svg => ImageFormat::Svg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn out_defaults_to_results_root() {
        let cli = Cli::parse_from(["h2im", "series", "--dir", "results"]);
        let Commands::Series { source, output } = cli.command else {
            panic!("expected series");
        };
        assert_eq!(output.out_dir(&source), PathBuf::from("results"));
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["h2im", "--log-level", "debug", "plot", "--format", "svg"]);
        assert_eq!(cli.log_level, tracing::Level::DEBUG);
        let Commands::Plot { format, .. } = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(format.map(ImageFormat::from), Some(ImageFormat::Svg));
    }
}
