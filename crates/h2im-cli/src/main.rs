use std::io;
use std::process;

use clap::Parser;
use h2im_cli::{Cli, Commands};
use h2im_core::exit_code_for;
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {err}");
    }
    debug!(command = ?cli.command, "starting h2im");

    let result = match &cli.command {
        Commands::Plot {
            source,
            output,
            format,
        } => commands::plot::handle(source, output, *format),
        Commands::Series { source, output } => commands::series::handle(source, output),
        Commands::Check { source } => commands::check::handle(source),
        Commands::List => commands::list::handle(),
    };

    if let Err(err) = result {
        error!("{err:?}");
        process::exit(exit_code_for(&err));
    }
}
