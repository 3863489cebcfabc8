mod output;
mod prep;
mod select;
mod validate;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "exemplar";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Pick well-separated, high-scoring windows from a scored BED file.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSE_ARG)
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase logging: -v for info, -vv for debug"),
        )
        .subcommand(select::cli::create_select_cli())
        .subcommand(validate::cli::create_validate_cli())
        .subcommand(prep::cli::create_prep_cli())
}

fn init_logger(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SELECT
        //
        Some((select::cli::SELECT_CMD, matches)) => {
            init_logger(matches.get_count(consts::VERBOSE_ARG));
            select::handlers::run_select(matches)?;
        }

        //
        // VALIDATE
        //
        Some((validate::cli::VALIDATE_CMD, matches)) => {
            init_logger(matches.get_count(consts::VERBOSE_ARG));
            validate::handlers::run_validate(matches)?;
        }

        //
        // PREP
        //
        Some((prep::cli::PREP_CMD, matches)) => {
            init_logger(matches.get_count(consts::VERBOSE_ARG));
            prep::handlers::run_prep(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_verbosity_reaches_subcommands() {
        let matches = build_parser()
            .try_get_matches_from(["exemplar", "validate", "--input", "x.bed", "--distance", "100", "-vv"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, validate::cli::VALIDATE_CMD);
        assert_eq!(sub.get_count(consts::VERBOSE_ARG), 2);
    }
}
