use std::path::Path;

use anyhow::{Context, Result};
use h2im_core::{H2imError, Horizon, PlotConfig, ResultFile, SensitivitySettings};
use h2im_io::{check_against_settings, discover_layout, ResultLayout, ResultTables};
use h2im_viz::{Figure, PlotContext, PlotKind};
use tracing::info;

/// A results tree with its settings and every table loaded.
pub struct Study {
    pub settings: SensitivitySettings,
    pub layout: ResultLayout,
    pub tables: ResultTables,
}

impl Study {
    pub fn load(dir: &Path) -> Result<Self> {
        info!(dir = %dir.display(), "reading sensitivity settings");
        let settings = SensitivitySettings::from_dir(dir)?;
        let layout = discover_layout(dir)?;
        // mismatches are logged as warnings; plotting continues
        check_against_settings(&layout, &settings);
        layout.validate(&ResultFile::ALL)?;

        info!(
            configurations = layout.configuration_ids().len(),
            runs = layout.all_run_ids().len(),
            "loading result tables"
        );
        let tables = ResultTables::load(&layout)
            .with_context(|| format!("loading results under {}", dir.display()))?;
        Ok(Self {
            settings,
            layout,
            tables,
        })
    }

    pub fn context(&self, horizon: Horizon) -> PlotContext<'_> {
        PlotContext::new(
            &self.tables,
            &self.settings,
            horizon,
            self.layout.configuration_ids(),
        )
    }

    pub fn build_figures(&self, config: &PlotConfig, kinds: &[PlotKind]) -> Result<Vec<Figure>> {
        let ctx = self.context(config.horizon());
        kinds
            .iter()
            .map(|kind| {
                kind.build(&ctx)
                    .with_context(|| format!("building plot {kind}"))
            })
            .collect()
    }
}

pub fn ensure_out_dir(out_dir: &Path) -> Result<()> {
    if !out_dir.is_dir() {
        return Err(H2imError::MissingOutputDir(out_dir.to_path_buf()).into());
    }
    Ok(())
}
