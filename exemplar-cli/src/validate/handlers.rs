use anyhow::Result;
use clap::ArgMatches;
use log::info;

use exemplar_select::validate_spacing;

use crate::output::load_input;

pub fn run_validate(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("--input is required");
    let distance = *matches
        .get_one::<u32>("distance")
        .expect("--distance is required");

    let rs = load_input(input)?;
    if let Err(violation) = validate_spacing(&rs, distance) {
        eprintln!("a -> {}", violation.first);
        eprintln!("b -> {}", violation.second);
        anyhow::bail!(violation.to_string());
    }

    info!("{} regions are at least {} bases apart", rs.len(), distance);
    Ok(())
}
