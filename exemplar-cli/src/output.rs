use std::path::Path;

use anyhow::{Context, Result};

use exemplar_core::models::RegionSet;
use exemplar_core::utils::get_dynamic_writer;

///
/// Write regions as BED4 to `output`, or to stdout when no path is given.
///
pub fn write_output(rs: &RegionSet, output: Option<&String>) -> Result<()> {
    match output {
        Some(p) => {
            rs.to_bed(Path::new(p))
                .with_context(|| format!("Failed to write output to {}", p))?;
            log::info!("Output written to {}", p);
        }
        None => {
            let mut out = get_dynamic_writer(None)?;
            rs.write_bed(&mut out)?;
            out.finish()?;
        }
    }
    Ok(())
}

pub fn load_input(path: &str) -> Result<RegionSet> {
    RegionSet::try_from(path).with_context(|| format!("Failed to load BED file {}", path))
}
