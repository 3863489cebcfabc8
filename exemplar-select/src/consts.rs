/// Exclusion half-width, in windows, for 25kb windows stepped by 1kb.
pub const DEFAULT_WINDOW_SPAN: usize = 23;

/// Exclusion half-width, in windows, for 4.2kb windows stepped by 200nt.
pub const DEFAULT_RELAXED_WINDOW_SPAN: usize = 10;

/// Rejections the alias sampler tolerates before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

/// Requested subset size when none is given to a capped strategy.
pub const DEFAULT_K: usize = 100_000;

/// Bases added on each side of a 1kb bin to form a 25kb window.
pub const DEFAULT_EXTEND: u32 = 12_000;

pub const DEFAULT_WINDOW_SIZE: u32 = 1_000;
