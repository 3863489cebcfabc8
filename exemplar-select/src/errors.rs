use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error(
        "Absolute end coordinates are not sorted: interval {index} ends at {current}, before the previous end {previous}. Input must be sorted by chromosome and start"
    )]
    UnsortedCoordinates {
        index: usize,
        previous: u64,
        current: u64,
    },

    #[error(
        "Ran into maximum sample attempts after finding {found} of {requested} intervals; reduce k"
    )]
    AttemptsExhausted { found: usize, requested: usize },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Percentile must be within [0, 100], got {0}")]
    InvalidPercentile(f64),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type SelectResult<T> = std::result::Result<T, SelectError>;
