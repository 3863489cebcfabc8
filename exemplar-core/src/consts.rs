/// Separator between scores in the fourth column of multi-score records.
pub const MULTI_SCORE_DELIM: char = ';';

/// Path value that selects stdin (input) or stdout (output).
pub const STDIO_PATH: &str = "-";

/// Separator between the scores of windows merged into one record.
pub const REDUCE_MAP_SCORE_DELIM: char = '|';
