//! Codec engine seam.
//!
//! The state machines in [`crate::deflate`] and [`crate::inflate`] drive an
//! opaque engine through a push interface: hand it one input chunk, collect
//! whatever output chunks it emits, repeat. Exactly one backend is compiled
//! in, selected through cargo features; everything above this module depends
//! only on the trait objects returned by the factory functions.

use std::collections::VecDeque;

use crate::types::FlateError;

#[cfg(feature = "zlib")]
mod zlib;

#[cfg(all(feature = "miniz", not(feature = "zlib")))]
mod oxide;

#[cfg(not(any(feature = "zlib", feature = "miniz")))]
compile_error!("either the `zlib` or the `miniz` engine backend must be enabled");

/// Compression side of the engine contract.
pub trait DeflateEngine: Send {
    /// Consumes all of `input`, appending whatever output the engine emits to
    /// `out`. `finish` requests finalization; once the closing sequence has
    /// been written the call returns `true` and the engine must not be fed
    /// again.
    fn feed(&mut self, input: &[u8], finish: bool, out: &mut ChunkQueue)
        -> Result<bool, FlateError>;
}

/// Decompression side of the engine contract. End of stream is detected from
/// the bitstream itself, so there is no finish flag.
pub trait InflateEngine: Send {
    /// Consumes all of `input`, appending decoded output to `out`. Returns
    /// `true` once the end of the compressed stream has been reached;
    /// trailing bytes beyond that point are ignored.
    fn feed(&mut self, input: &[u8], out: &mut ChunkQueue) -> Result<bool, FlateError>;
}

pub(crate) fn new_deflate_engine(raw: bool, level: u32) -> Box<dyn DeflateEngine> {
    #[cfg(feature = "zlib")]
    return Box::new(zlib::ZlibDeflate::new(raw, level));

    #[cfg(all(feature = "miniz", not(feature = "zlib")))]
    return Box::new(oxide::OxideDeflate::new(raw, level));
}

pub(crate) fn new_inflate_engine(raw: bool) -> Box<dyn InflateEngine> {
    #[cfg(feature = "zlib")]
    return Box::new(zlib::ZlibInflate::new(raw));

    #[cfg(all(feature = "miniz", not(feature = "zlib")))]
    return Box::new(oxide::OxideInflate::new(raw));
}

/// Queue of output chunks emitted by an engine.
///
/// Chunks are produced synchronously inside `feed` and drained synchronously
/// by the transform calls, so plain storage is enough; no callback machinery
/// is involved.
#[derive(Debug, Default)]
pub struct ChunkQueue {
    chunks: VecDeque<Vec<u8>>,
    /// Read offset into the front chunk.
    head: usize,
}

impl ChunkQueue {
    /// Appends a chunk. Empty chunks are dropped.
    pub fn push(&mut self, chunk: &[u8]) {
        if !chunk.is_empty() {
            self.chunks.push_back(chunk.to_vec());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.chunks.clear();
        self.head = 0;
    }

    /// Copies queued bytes into `out`, in emission order, and returns the
    /// number of bytes written.
    pub(crate) fn read_into(&mut self, out: &mut [u8]) -> usize {
        let mut written = 0;
        while written < out.len() {
            let front = match self.chunks.front() {
                Some(front) => front,
                None => break,
            };
            let front_len = front.len();
            let to_copy = (front_len - self.head).min(out.len() - written);
            out[written..written + to_copy]
                .copy_from_slice(&front[self.head..self.head + to_copy]);
            written += to_copy;
            self.head += to_copy;
            if self.head == front_len {
                self.chunks.pop_front();
                self.head = 0;
            }
        }
        written
    }
}
