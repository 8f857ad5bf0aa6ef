//! Pull-based stream adapters.
//!
//! [`DeflatingReader`] presents a compressed view over an uncompressed
//! reader, [`InflatingReader`] the reverse. Each read request pulls at most
//! one chunk of upstream bytes per "needs input" round, hands it to the
//! state machine, and drains transformed bytes directly into the caller's
//! buffer. The adapter owns its state machine; the upstream reader stays the
//! caller's to manage (pass `&mut reader` to keep ownership).

use std::io::{self, Read};

use log::debug;

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, MAX_CHUNK_SIZE};
use crate::deflate::Deflater;
use crate::inflate::Inflater;

/// Compressing reader: pulls uncompressed bytes from `upstream` and yields
/// compressed bytes.
pub struct DeflatingReader<R: Read> {
    upstream: R,
    deflater: Deflater,
    /// Upstream bytes staged for the next `set_input`.
    staging: Vec<u8>,
    chunk_size: usize,
    upstream_eof: bool,
}

impl<R: Read> DeflatingReader<R> {
    pub fn new(upstream: R, raw: bool, level: u32) -> Self {
        Self::with_chunk_size(upstream, raw, level, DEFAULT_CHUNK_SIZE)
    }

    /// # Panics
    /// If `chunk_size` is 0 or beyond the sanity bound, or `level` is out of
    /// range.
    pub fn with_chunk_size(upstream: R, raw: bool, level: u32, chunk_size: usize) -> Self {
        assert!(chunk_size > 0 && chunk_size <= MAX_CHUNK_SIZE);
        Self {
            upstream,
            deflater: Deflater::new(raw, level),
            staging: vec![0u8; chunk_size],
            chunk_size,
            upstream_eof: false,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.upstream
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.upstream
    }

    pub fn into_inner(self) -> R {
        self.upstream
    }
}

impl<R: Read> Read for DeflatingReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        let mut total = 0;
        while total < out.len() {
            // Refill: one upstream pull per needs-input round. A compression
            // stream must still flush its closing sequence even when the
            // upstream had no bytes at all.
            if self.deflater.needs_input() && !self.upstream_eof {
                let n = self.upstream.read(&mut self.staging)?;
                if n == 0 {
                    self.upstream_eof = true;
                    self.deflater.finish();
                } else {
                    self.deflater.set_input(&self.staging[..n]);
                }
            }
            let limit = (out.len() - total).min(self.chunk_size);
            let written = self
                .deflater
                .deflate(&mut out[total..total + limit])
                .map_err(io::Error::from)?;
            if written > 0 {
                total += written;
                continue;
            }
            if self.deflater.finished() {
                break;
            }
        }
        Ok(total)
    }
}

/// Decompressing reader: pulls compressed bytes from `upstream` and yields
/// uncompressed bytes.
///
/// If the upstream ends before the engine signals end of stream, the
/// truncated data is treated as ordinary end of stream rather than an error;
/// malformed data the engine rejects still fails the read with
/// [`io::ErrorKind::InvalidData`].
pub struct InflatingReader<R: Read> {
    upstream: R,
    inflater: Inflater,
    staging: Vec<u8>,
    chunk_size: usize,
}

impl<R: Read> InflatingReader<R> {
    pub fn new(upstream: R, raw: bool) -> Self {
        Self::with_chunk_size(upstream, raw, DEFAULT_CHUNK_SIZE)
    }

    /// # Panics
    /// If `chunk_size` is 0 or beyond the sanity bound.
    pub fn with_chunk_size(upstream: R, raw: bool, chunk_size: usize) -> Self {
        assert!(chunk_size > 0 && chunk_size <= MAX_CHUNK_SIZE);
        Self {
            upstream,
            inflater: Inflater::new(raw),
            staging: vec![0u8; chunk_size],
            chunk_size,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.upstream
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.upstream
    }

    pub fn into_inner(self) -> R {
        self.upstream
    }
}

impl<R: Read> Read for InflatingReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        let mut total = 0;
        while total < out.len() {
            if self.inflater.needs_input() {
                let n = self.upstream.read(&mut self.staging)?;
                if n == 0 {
                    debug!("upstream ended before stream end; treating as end of stream");
                    break;
                }
                self.inflater.set_input(&self.staging[..n]);
            }
            let limit = (out.len() - total).min(self.chunk_size);
            let written = self
                .inflater
                .inflate(&mut out[total..total + limit])
                .map_err(io::Error::from)?;
            if written > 0 {
                total += written;
                continue;
            }
            if self.inflater.finished() {
                break;
            }
        }
        Ok(total)
    }
}

/// Adapter constructors for any [`Read`] value.
pub trait FlateExt: Read + Sized {
    /// Wraps `self` in a compressing reader.
    fn deflating(self, raw: bool, level: u32) -> DeflatingReader<Self> {
        DeflatingReader::new(self, raw, level)
    }

    /// Wraps `self` in a compressing reader at the default level.
    fn deflating_default(self, raw: bool) -> DeflatingReader<Self> {
        DeflatingReader::new(self, raw, DEFAULT_LEVEL)
    }

    /// Wraps `self` in a decompressing reader.
    fn inflating(self, raw: bool) -> InflatingReader<Self> {
        InflatingReader::new(self, raw)
    }
}

impl<R: Read> FlateExt for R {}
