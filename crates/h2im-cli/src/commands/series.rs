use anyhow::Result;
use h2im_cli::manifest::record_manifest;
use h2im_cli::{OutputArgs, SourceArgs};
use h2im_core::PlotConfig;
use h2im_viz::{export_series, select_plots};
use tracing::info;

use super::study::{ensure_out_dir, Study};

pub fn handle(source: &SourceArgs, output: &OutputArgs) -> Result<()> {
    let out_dir = output.out_dir(source);
    ensure_out_dir(&out_dir)?;
    let config = PlotConfig::load_or_default(output.config.as_deref())?;
    let kinds = select_plots(output.plots.as_deref())?;

    let study = Study::load(&source.dir)?;
    let figures = study.build_figures(&config, &kinds)?;
    let outputs = figures
        .iter()
        .map(|figure| export_series(figure, &out_dir))
        .collect::<Result<Vec<_>>>()?;

    let dir = source.dir.display().to_string();
    let plots = output.plots.clone().unwrap_or_else(|| "all".to_string());
    let manifest = record_manifest(
        &out_dir,
        "series",
        &[("dir", dir.as_str()), ("plots", plots.as_str())],
        &outputs,
    )?;
    info!(manifest = %manifest.display(), "recorded run manifest");
    println!(
        "Exported {} series file(s) into {}",
        outputs.len(),
        out_dir.display()
    );
    Ok(())
}
