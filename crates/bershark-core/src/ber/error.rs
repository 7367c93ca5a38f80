use thiserror::Error;

use crate::source::SourceError;

/// Errors returned by BER field reads and node decoding.
///
/// A clean end of input before the first tag byte is not an error; the
/// reader and parser report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("input truncated while reading a {context}")]
    Truncated { context: &'static str },
    #[error("encoded size {needed} exceeds the remaining budget of {budget} bytes")]
    BudgetExceeded { needed: u64, budget: u64 },
    #[error("tag number overflow after {nbytes} bytes")]
    TagOverflow { nbytes: u64 },
    #[error("length overflow after {nbytes} bytes")]
    LengthOverflow { nbytes: u64 },
    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: u32 },
}
