use thiserror::Error;

#[derive(Debug, Error)]
pub enum FluxError {
    #[error("flux model library not found; set IRBEM_LIB_PATH or install libirbem")]
    LibraryNotFound,
    #[error("failed to load flux model library: {0}")]
    LibraryLoad(#[from] libloading::Error),
    #[error("flux model library is missing symbol {0}")]
    MissingSymbol(&'static str),
    #[error("flux model library reported invalid row capacity {0}")]
    InvalidCapacity(i32),
    #[error("unknown flux model '{0}', expected ae8min/ae8max/ap8min/ap8max or an esa variant")]
    UnknownModel(String),
    #[error("chunk of {given} rows exceeds native capacity {max}")]
    TooManyRows { given: usize, max: usize },
}
