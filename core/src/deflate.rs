//! Streaming compressor.
//!
//! [`Deflater`] layers pull-style "give me up to N compressed bytes"
//! semantics over the engine's push interface: callers alternate between
//! supplying input chunks while [`Deflater::needs_input`] is true and
//! draining output through [`Deflater::deflate`]. [`deflate`] and
//! [`deflate_with`] drive the machine over a whole buffer in one call.

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, MAX_CHUNK_SIZE, MAX_LEVEL};
use crate::engine::{self, ChunkQueue, DeflateEngine};
use crate::types::FlateError;

/// Streaming compressor over a swappable codec engine.
///
/// Not safe for concurrent use from multiple threads of control; wrap in
/// external exclusion if shared.
pub struct Deflater {
    raw: bool,
    level: u32,
    /// `None` once closed.
    engine: Option<Box<dyn DeflateEngine>>,
    input: Vec<u8>,
    input_pending: bool,
    finish_requested: bool,
    /// The engine has emitted its closing sequence.
    final_seen: bool,
    /// Any input has been fed. Gates level changes.
    started: bool,
    out: ChunkQueue,
}

impl Deflater {
    /// Creates a compressor.
    ///
    /// With `raw` set, the zlib header and checksum fields are omitted so the
    /// output matches the payload format used inside both GZIP and PKZIP
    /// containers. `level` ranges from 0 (no compression) to 9 (best ratio,
    /// slowest).
    ///
    /// # Panics
    /// If `level` is out of range.
    pub fn new(raw: bool, level: u32) -> Self {
        assert!(
            level <= MAX_LEVEL,
            "compression level must be 0..={}, got {}",
            MAX_LEVEL,
            level
        );
        Self {
            raw,
            level,
            engine: Some(engine::new_deflate_engine(raw, level)),
            input: Vec::new(),
            input_pending: false,
            finish_requested: false,
            final_seen: false,
            started: false,
            out: ChunkQueue::default(),
        }
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Changes the compression level, rebuilding the engine.
    ///
    /// # Panics
    /// If input has already been fed. The engine bakes the level in at
    /// construction, so a mid-stream change would discard buffered state and
    /// corrupt any output already produced.
    pub fn set_level(&mut self, level: u32) {
        assert!(
            level <= MAX_LEVEL,
            "compression level must be 0..={}, got {}",
            MAX_LEVEL,
            level
        );
        assert!(
            !self.started,
            "compression level cannot change after input has been fed"
        );
        if level == self.level {
            return;
        }
        self.level = level;
        if self.engine.is_some() {
            self.engine = Some(engine::new_deflate_engine(self.raw, level));
            self.out.clear();
        }
    }

    /// Supplies the next chunk of uncompressed bytes.
    ///
    /// # Panics
    /// If called while [`Self::needs_input`] is false.
    pub fn set_input(&mut self, chunk: &[u8]) {
        assert!(
            self.needs_input(),
            "set_input called while the deflater holds unconsumed input"
        );
        self.input.clear();
        self.input.extend_from_slice(chunk);
        self.input_pending = true;
        self.started = true;
    }

    /// True when the machine holds no unconsumed input and has not been
    /// finalized; callers should supply the next chunk before draining more
    /// output.
    pub fn needs_input(&self) -> bool {
        !self.input_pending && !self.final_seen
    }

    /// True once the closing sequence has been emitted and all buffered
    /// output drained. Terminal.
    pub fn finished(&self) -> bool {
        self.final_seen && self.out.is_empty()
    }

    /// Signals that no further input chunks will arrive; the closing
    /// sequence is flushed on the next [`Self::deflate`] call.
    pub fn finish(&mut self) {
        self.finish_requested = true;
    }

    /// Compresses pending input and fills `out` with up to `out.len()` bytes
    /// of compressed data, returning the count written.
    ///
    /// A return of 0 is not an error: check [`Self::needs_input`] and
    /// [`Self::finished`] to decide whether to supply more input or stop.
    pub fn deflate(&mut self, out: &mut [u8]) -> Result<usize, FlateError> {
        if !self.final_seen && (self.input_pending || self.finish_requested) {
            if let Some(engine) = self.engine.as_mut() {
                self.final_seen = engine.feed(&self.input, self.finish_requested, &mut self.out)?;
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

impl Default for Deflater {
    fn default() -> Self {
        Self::new(true, DEFAULT_LEVEL)
    }
}

/// Compresses `data` in one call at the default level and chunk size.
pub fn deflate(data: &[u8], raw: bool) -> Result<Vec<u8>, FlateError> {
    deflate_with(data, raw, DEFAULT_LEVEL, DEFAULT_CHUNK_SIZE)
}

/// Compresses `data` in one call.
///
/// # Panics
/// If `chunk_size` is 0 or beyond the sanity bound.
pub fn deflate_with(
    data: &[u8],
    raw: bool,
    level: u32,
    chunk_size: usize,
) -> Result<Vec<u8>, FlateError> {
    assert!(chunk_size > 0 && chunk_size <= MAX_CHUNK_SIZE);
    let mut deflater = Deflater::new(raw, level);
    deflater.set_input(data);
    deflater.finish();

    let mut out = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    while !deflater.finished() {
        let n = deflater.deflate(&mut chunk)?;
        out.extend_from_slice(&chunk[..n]);
    }
    Ok(out)
}
