//! Error types shared across the crate.

use std::io;

use thiserror::Error;

/// Unified error for compression and decompression.
///
/// Precondition violations (feeding input while the machine holds unconsumed
/// input, changing the level mid-stream) are programmer errors and panic
/// instead of surfacing here.
#[derive(Debug, Error)]
pub enum FlateError {
    /// The codec engine rejected or failed to process a chunk.
    #[error("codec engine failed: {msg}")]
    Engine { msg: String },

    /// The compressed input is malformed. The stream is unusable for further
    /// reads once this has been returned.
    #[error("corrupt deflate stream: {msg}")]
    CorruptStream { msg: String },
}

impl From<FlateError> for io::Error {
    fn from(e: FlateError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
