use clap::{Arg, Command, arg, value_parser};

pub const VALIDATE_CMD: &str = "validate";

pub fn create_validate_cli() -> Command {
    Command::new(VALIDATE_CMD)
        .about("Check that consecutive regions on a chromosome are at least a given distance apart.")
        .arg(arg!(--input <BED> "Sorted BED file, optionally gzip'd, or - for stdin").required(true))
        .arg(
            Arg::new("distance")
                .long("distance")
                .short('d')
                .required(true)
                .value_parser(value_parser!(u32))
                .help("Minimum gap between the end of one region and the start of the next"),
        )
}
