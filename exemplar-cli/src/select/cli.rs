use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const SELECT_CMD: &str = "select";

pub fn create_select_cli() -> Command {
    Command::new(SELECT_CMD)
        .about("Select well-separated, high-scoring windows from a scored BED4 file.")
        .arg(arg!(--input <BED> "Input BED4 file, optionally gzip'd, or - for stdin").required(true))
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .short('s')
                .value_parser(["optimal", "greedy", "relaxed", "alias"])
                .help("Selection strategy [default: optimal]"),
        )
        .arg(
            Arg::new("k")
                .long("k")
                .short('k')
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Number of windows to select; optimal runs uncapped when omitted"),
        )
        .arg(
            Arg::new("window-span")
                .long("window-span")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Exclusion half-width in windows [default: 23, or 10 for relaxed]"),
        )
        .arg(
            Arg::new("marking")
                .long("marking")
                .value_parser(["full", "single"])
                .help("Block the whole window around an accepted index, or only the index"),
        )
        .arg(
            Arg::new("bounds")
                .long("bounds")
                .value_parser(["half-open", "closed"])
                .help("Whether the exclusion window includes index + window-span"),
        )
        .arg(
            Arg::new("kth-percentile")
                .long("kth-percentile")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .conflicts_with("percentile")
                .help("Score at or above which the relaxed strategy ignores exclusion"),
        )
        .arg(
            Arg::new("percentile")
                .long("percentile")
                .value_parser(value_parser!(f64))
                .help("Derive the relaxed threshold from this percentile (0-100) of the scores"),
        )
        .arg(
            Arg::new("final-pass")
                .long("final-pass")
                .action(ArgAction::SetTrue)
                .help("Disable threshold-based acceptance in the relaxed strategy"),
        )
        .arg(
            Arg::new("max-attempts")
                .long("max-attempts")
                .value_parser(value_parser!(usize))
                .help("Rejected draws the alias strategy tolerates [default: 100000]"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("Random seed for reproducible alias sampling"),
        )
        .arg(
            Arg::new("extend")
                .long("extend")
                .value_parser(value_parser!(u32))
                .requires("window-size")
                .help("Widen every window by this many bases on both sides before selecting"),
        )
        .arg(
            Arg::new("window-size")
                .long("window-size")
                .value_parser(value_parser!(u32))
                .requires("extend")
                .help("Width of the input windows; extended windows of another width are dropped"),
        )
        .arg(
            Arg::new("offset-basis")
                .long("offset-basis")
                .value_parser(["extent", "width"])
                .help("How chromosome offsets are accumulated for the optimal strategy [default: extent]"),
        )
        .arg(arg!(--config <TOML> "Selection settings file; flags override its values").required(false))
        .arg(arg!(--output <OUTPUT> "Output BED file (default: stdout)").required(false))
        .arg(
            Arg::new("stats")
                .long("stats")
                .action(ArgAction::SetTrue)
                .help("Print a JSON summary of the selection to stderr"),
        )
}
