use std::io;
use thiserror::Error;

/// Errors produced while encoding or decoding an LZSS stream.
#[derive(Debug, Error)]
pub enum LzssError {
    /// The window was asked for a byte it does not hold.
    #[error("window distance {distance} out of range (1..={available})")]
    OutOfRange { distance: usize, available: usize },

    /// A match whose offset or length the wire format cannot carry.
    #[error("invalid match: offset {offset}, length {length}")]
    InvalidMatch { offset: usize, length: usize },

    /// The input ended inside a flag group that still declares token bodies.
    #[error("truncated stream at byte {position}: group needs {needed} more bytes, {available} left")]
    TruncatedStream {
        position: usize,
        needed: usize,
        available: usize,
    },

    /// A match refers to data before the start of the output.
    #[error("invalid match offset {offset} at output byte {position} ({available} bytes addressable)")]
    InvalidOffset {
        offset: usize,
        available: usize,
        position: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LzssError>;
