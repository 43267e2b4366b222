use std::io::{self, Write};

use anyhow::Result;
use h2im_cli::SourceArgs;
use h2im_core::{LabelPolicy, ResultFile};
use h2im_viz::Labeler;
use tabwriter::TabWriter;

use super::study::Study;

pub fn handle(source: &SourceArgs) -> Result<()> {
    let study = Study::load(&source.dir)?;
    let settings = &study.settings;
    let labeler = Labeler::new(settings, LabelPolicy::Lenient);

    println!(
        "Analysis: {} ({} run(s) per configuration)",
        settings.analysis_type(),
        settings.run_count()
    );
    println!("{}", labeler.header()?);

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "CONFIGURATION\tPARAMETERS\tRUNS")?;
    for id in study.layout.configuration_ids() {
        writeln!(
            writer,
            "{}\t{}\t{}",
            id,
            labeler.configuration_label(id)?,
            study.layout.run_ids(id).len()
        )?;
    }
    writer.flush()?;

    println!();
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "FILE\tROWS")?;
    for file in ResultFile::ALL {
        writeln!(writer, "{}\t{}", file, study.tables.row_count(file))?;
    }
    writer.flush()?;
    Ok(())
}
