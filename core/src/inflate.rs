//! Streaming decompressor.
//!
//! Structurally the mirror of [`crate::deflate`]: [`Inflater`] wraps one
//! engine and exposes the same supply/drain contract, minus the level knob
//! and the explicit finish call. End of stream is inferred from the engine's
//! own end-of-stream signal, or from running out of input; compressed data
//! that is truncated without a hard engine error is treated as ordinary end
//! of stream, uniformly across backends.

use log::debug;

use crate::constants::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::engine::{self, ChunkQueue, InflateEngine};
use crate::types::FlateError;

/// Streaming decompressor over a swappable codec engine.
///
/// Not safe for concurrent use from multiple threads of control; wrap in
/// external exclusion if shared.
pub struct Inflater {
    raw: bool,
    /// `None` once closed.
    engine: Option<Box<dyn InflateEngine>>,
    input: Vec<u8>,
    input_pending: bool,
    /// The engine has reached the end of the compressed stream.
    final_seen: bool,
    out: ChunkQueue,
}

impl Inflater {
    /// Creates a decompressor. With `raw` set, the input is expected to be a
    /// headerless deflate bitstream rather than a zlib-wrapped one.
    pub fn new(raw: bool) -> Self {
        Self {
            raw,
            engine: Some(engine::new_inflate_engine(raw)),
            input: Vec::new(),
            input_pending: false,
            final_seen: false,
            out: ChunkQueue::default(),
        }
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Supplies the next chunk of compressed bytes.
    ///
    /// # Panics
    /// If called while [`Self::needs_input`] is false.
    pub fn set_input(&mut self, chunk: &[u8]) {
        assert!(
            self.needs_input(),
            "set_input called while the inflater holds unconsumed input"
        );
        self.input.clear();
        self.input.extend_from_slice(chunk);
        self.input_pending = true;
    }

    /// True when the machine holds no unconsumed input and the stream has
    /// not ended.
    pub fn needs_input(&self) -> bool {
        !self.input_pending && !self.final_seen
    }

    /// True once the end of the compressed stream was reached and all
    /// buffered output drained. Terminal.
    pub fn finished(&self) -> bool {
        self.final_seen && self.out.is_empty()
    }

    /// Decompresses pending input and fills `out` with up to `out.len()`
    /// bytes, returning the count written.
    ///
    /// A return of 0 is not an error: check [`Self::needs_input`] and
    /// [`Self::finished`] to decide whether to supply more input or stop.
    /// Malformed input surfaces here as [`FlateError::CorruptStream`] and
    /// leaves the stream unusable.
    pub fn inflate(&mut self, out: &mut [u8]) -> Result<usize, FlateError> {
        if self.input_pending && !self.final_seen {
            if let Some(engine) = self.engine.as_mut() {
                self.final_seen = engine.feed(&self.input, &mut self.out)?;
            }
            self.input.clear();
            self.input_pending = false;
        }
        Ok(self.out.read_into(out))
    }

    /// Releases the engine. Idempotent, safe mid-stream, never fails;
    /// dropping the value is equivalent.
    pub fn close(&mut self) {
        self.engine = None;
        self.out.clear();
        self.input.clear();
        self.input_pending = false;
        self.final_seen = true;
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Decompresses `data` in one call at the default chunk size.
pub fn inflate(data: &[u8], raw: bool) -> Result<Vec<u8>, FlateError> {
    inflate_with(data, raw, DEFAULT_CHUNK_SIZE)
}

/// Decompresses `data` in one call.
///
/// Input that ends before the stream's closing sequence yields whatever was
/// decodable. Bytes past the closing sequence are ignored.
///
/// # Panics
/// If `chunk_size` is 0 or beyond the sanity bound.
pub fn inflate_with(data: &[u8], raw: bool, chunk_size: usize) -> Result<Vec<u8>, FlateError> {
    assert!(chunk_size > 0 && chunk_size <= MAX_CHUNK_SIZE);
    let mut inflater = Inflater::new(raw);
    inflater.set_input(data);

    let mut out = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    while !inflater.finished() {
        let n = inflater.inflate(&mut chunk)?;
        if n > 0 {
            out.extend_from_slice(&chunk[..n]);
            continue;
        }
        if inflater.needs_input() {
            debug!("compressed input ran out before stream end; treating as end of stream");
            break;
        }
    }
    Ok(out)
}
