use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use exemplar_core::models::{Region, RegionSet};
use exemplar_core::reduce_map::ReduceMap;
use exemplar_core::utils::{
    get_dynamic_reader_w_stdin, get_dynamic_writer, is_header_line, parse_multi_score_line,
};
use exemplar_select::consts::{DEFAULT_EXTEND, DEFAULT_WINDOW_SIZE};

use crate::output::{load_input, write_output};
use crate::prep::cli::{EXTEND_CMD, MAX_SCORE_CMD, REDUCE_MAP_CMD};

pub fn run_prep(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some((EXTEND_CMD, m)) => {
            let input = m.get_one::<String>("input").expect("--input is required");
            let extend = m.get_one::<u32>("extend").copied().unwrap_or(DEFAULT_EXTEND);
            let window_size = m
                .get_one::<u32>("window-size")
                .copied()
                .unwrap_or(DEFAULT_WINDOW_SIZE);

            let rs = load_input(input)?;
            let extended = rs.extend_and_filter(extend, window_size);
            info!(
                "{} of {} windows kept after extending by {}",
                extended.len(),
                rs.len(),
                extend
            );
            write_output(&extended, m.get_one::<String>("output"))
        }
        Some((MAX_SCORE_CMD, m)) => {
            let input = m.get_one::<String>("input").expect("--input is required");
            let rs = read_max_scores(input)?;
            write_output(&rs, m.get_one::<String>("output"))
        }
        Some((REDUCE_MAP_CMD, m)) => {
            let input = m.get_one::<String>("input").expect("--input is required");
            let window = *m.get_one::<u32>("window").expect("--window is required");
            let bin_size = *m.get_one::<u32>("bin-size").expect("--bin-size is required");
            reduce_map(input, window, bin_size, m.get_one::<String>("output"))
        }
        _ => unreachable!("prep subcommand not found"),
    }
}

fn reduce_map(input: &str, window: u32, bin_size: u32, output: Option<&String>) -> Result<()> {
    let mut rm = ReduceMap::new(window, bin_size)?;
    let reader = get_dynamic_reader_w_stdin(input)
        .with_context(|| format!("Failed to open {}", input))?;
    let mut writer = get_dynamic_writer(output.map(Path::new))?;

    let written = rm
        .run(reader, &mut writer)
        .with_context(|| format!("Failed to reduce-map {}", input))?;
    writer.finish()?;

    info!(
        "{} records written at exemplar size {}",
        written,
        rm.exemplar_size()
    );
    Ok(())
}

fn read_max_scores(input: &str) -> Result<RegionSet> {
    let reader = get_dynamic_reader_w_stdin(input)
        .with_context(|| format!("Failed to open {}", input))?;

    let mut regions: Vec<Region> = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || is_header_line(&line) {
            continue;
        }
        regions.push(parse_multi_score_line(&line, idx + 1)?);
    }
    Ok(RegionSet::from(regions))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_read_max_scores() {
        let rs = read_max_scores("../tests/data/selection/multi_score.bed").unwrap();
        assert_eq!(rs.scores(), vec![4.0, 3.0, 0.5]);
        assert_eq!(rs.regions[2].chr, "chr2");
    }

    #[rstest]
    fn test_reduce_map_to_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let output = tempdir.path().join("reduced.bed").to_string_lossy().to_string();

        reduce_map("../tests/data/selection/reduce_map.bed", 1000, 1000, Some(&output)).unwrap();

        let rs = RegionSet::try_from(output.as_str()).unwrap();
        assert_eq!(rs.len(), 4);
        assert!(rs.regions.iter().all(|r| r.width() == 3000));
        assert_eq!(rs.scores(), vec![5.0, 4.0, 6.0, 2.0]);
    }

    #[rstest]
    fn test_reduce_map_rejects_odd_exemplar_size() {
        assert!(reduce_map("../tests/data/selection/reduce_map.bed", 1000, 999, None).is_err());
    }
}
