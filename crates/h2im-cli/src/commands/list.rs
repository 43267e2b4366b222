use anyhow::Result;
use h2im_viz::PlotKind;

pub fn handle() -> Result<()> {
    for kind in PlotKind::ALL {
        println!("{kind}");
    }
    Ok(())
}
