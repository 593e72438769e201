use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlignError {
    /// The quadratic aligners refuse sequences above the configured ceiling.
    #[error("sequence of length {length} exceeds the limit of {limit}; use the linear-space aligner")]
    SequenceTooLong { length: usize, limit: usize },
    #[error("incompatible alignment options: {0}")]
    IncompatibleOptions(&'static str),
    #[error("{count} sequences exceeds the multiple alignment limit of {limit}")]
    TooManySequences { count: usize, limit: usize },
    #[error("multiple alignment needs at least 2 sequences, got {0}")]
    InsufficientSequences(usize),
    #[error("non-ASCII byte {byte:#04x} at position {position}")]
    NonAsciiSymbol { byte: u8, position: usize },
    #[error("no substitution matrix named: {0}")]
    UnknownMatrix(String),
    #[error("guide tree refers to a missing or already merged cluster: {0}")]
    InvalidGuideTree(usize),
    #[error("failed to build alignment thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
