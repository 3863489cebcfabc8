use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing region at line {line}: {message}")]
    RegionParseError { line: usize, message: String },

    #[error("Corrupted file. 0 regions found in the file: {0}")]
    EmptyRegionSet(String),

    #[error("Exemplar size 2 * {window} + {bin_size} must be even and non-zero")]
    InvalidExemplarSize { window: u32, bin_size: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type RegionSetResult<T> = std::result::Result<T, RegionSetError>;
