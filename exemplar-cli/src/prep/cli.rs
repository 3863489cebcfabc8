use clap::{Arg, Command, arg, value_parser};

use exemplar_select::consts::{DEFAULT_EXTEND, DEFAULT_WINDOW_SIZE};

pub const PREP_CMD: &str = "prep";
pub const EXTEND_CMD: &str = "extend";
pub const MAX_SCORE_CMD: &str = "max-score";
pub const REDUCE_MAP_CMD: &str = "reduce-map";

pub fn create_prep_cli() -> Command {
    Command::new(PREP_CMD)
        .about("Prepare scored windows for selection.")
        .subcommand_required(true)
        .subcommand(
            Command::new(EXTEND_CMD)
                .about("Widen every window on both sides and drop those clipped at a chromosome start.")
                .arg(arg!(--input <BED> "Input BED4 file").required(true))
                .arg(
                    Arg::new("extend")
                        .long("extend")
                        .value_parser(value_parser!(u32))
                        .help(format!("Bases added on each side [default: {}]", DEFAULT_EXTEND)),
                )
                .arg(
                    Arg::new("window-size")
                        .long("window-size")
                        .value_parser(value_parser!(u32))
                        .help(format!("Width of the input windows [default: {}]", DEFAULT_WINDOW_SIZE)),
                )
                .arg(arg!(--output <OUTPUT> "Output BED file (default: stdout)").required(false)),
        )
        .subcommand(
            Command::new(MAX_SCORE_CMD)
                .about("Collapse a fourth column of ';'-separated scores to its maximum.")
                .arg(arg!(--input <BED> "Input BED file").required(true))
                .arg(arg!(--output <OUTPUT> "Output BED file (default: stdout)").required(false)),
        )        .subcommand(
            Command::new(REDUCE_MAP_CMD)
                .about("Shrink merged records to the exemplar-sized window nearest their mean score.")
                .arg(arg!(--input <BED> "Merged BED file, fourth column of '|'-separated scores").required(true))
                .arg(
                    Arg::new("window")
                        .long("window")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Bases added on each side of a bin"),
                )
                .arg(
                    Arg::new("bin-size")
                        .long("bin-size")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Width of the original bins"),
                )
                .arg(arg!(--output <OUTPUT> "Output BED file (default: stdout)").required(false)),
        )
}
