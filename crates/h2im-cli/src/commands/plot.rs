use anyhow::{Context, Result};
use h2im_cli::manifest::record_manifest;
use h2im_cli::{FormatArg, OutputArgs, SourceArgs};
use h2im_core::PlotConfig;
use h2im_viz::{render_figure, select_plots, Labeler, RenderOptions};
use tracing::info;

use super::study::{ensure_out_dir, Study};

pub fn handle(source: &SourceArgs, output: &OutputArgs, format: Option<FormatArg>) -> Result<()> {
    let out_dir = output.out_dir(source);
    ensure_out_dir(&out_dir)?;
    let mut config = PlotConfig::load_or_default(output.config.as_deref())?;
    if let Some(format) = format {
        config.image.format = format.into();
    }
    let kinds = select_plots(output.plots.as_deref())?;

    let study = Study::load(&source.dir)?;
    let figures = study.build_figures(&config, &kinds)?;
    let labeler = Labeler::new(&study.settings, config.labels.policy);
    let options = RenderOptions::from(&config.image);

    let mut outputs = Vec::with_capacity(figures.len());
    for figure in &figures {
        let path = render_figure(figure, &labeler, &options, &out_dir)
            .with_context(|| format!("rendering plot {}", figure.name))?;
        outputs.push(path);
    }

    let dir = source.dir.display().to_string();
    let format = config.image.format.to_string();
    let plots = output.plots.clone().unwrap_or_else(|| "all".to_string());
    let manifest = record_manifest(
        &out_dir,
        "plot",
        &[
            ("dir", dir.as_str()),
            ("format", format.as_str()),
            ("plots", plots.as_str()),
        ],
        &outputs,
    )?;
    info!(manifest = %manifest.display(), "recorded run manifest");
    println!(
        "Rendered {} plot(s) into {}",
        outputs.len(),
        out_dir.display()
    );
    Ok(())
}
