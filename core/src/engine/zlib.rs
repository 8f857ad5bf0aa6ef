//! Engine backend on top of flate2.
//!
//! Wraps the low-level `Compress`/`Decompress` state machines. Input handed
//! to `feed` is always consumed in full; output is drained through a fixed
//! scratch buffer so the emitted chunks stay bounded regardless of ratio.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use log::trace;

use crate::constants::ENGINE_BUF_SIZE;
use crate::engine::{ChunkQueue, DeflateEngine, InflateEngine};
use crate::types::FlateError;

pub(crate) struct ZlibDeflate {
    inner: Compress,
    buf: Box<[u8]>,
}

impl ZlibDeflate {
    pub(crate) fn new(raw: bool, level: u32) -> Self {
        Self {
            inner: Compress::new(Compression::new(level), !raw),
            buf: vec![0u8; ENGINE_BUF_SIZE].into_boxed_slice(),
        }
    }
}

impl DeflateEngine for ZlibDeflate {
    fn feed(
        &mut self,
        input: &[u8],
        finish: bool,
        out: &mut ChunkQueue,
    ) -> Result<bool, FlateError> {
        let flush = if finish {
            FlushCompress::Finish
        } else {
            FlushCompress::None
        };
        let mut rest = input;
        loop {
            let before_in = self.inner.total_in();
            let before_out = self.inner.total_out();
            let status = self
                .inner
                .compress(rest, &mut self.buf, flush)
                .map_err(|e| FlateError::Engine { msg: e.to_string() })?;
            let consumed = (self.inner.total_in() - before_in) as usize;
            let produced = (self.inner.total_out() - before_out) as usize;
            rest = &rest[consumed..];
            out.push(&self.buf[..produced]);

            match status {
                Status::StreamEnd => {
                    trace!(
                        "deflate stream complete: {} bytes in, {} bytes out",
                        self.inner.total_in(),
                        self.inner.total_out()
                    );
                    return Ok(true);
                }
                Status::Ok | Status::BufError => {
                    if consumed == 0 && produced == 0 {
                        if rest.is_empty() && !finish {
                            return Ok(false);
                        }
                        return Err(FlateError::Engine {
                            msg: "deflate engine made no progress".into(),
                        });
                    }
                }
            }
        }
    }
}

pub(crate) struct ZlibInflate {
    inner: Decompress,
    buf: Box<[u8]>,
}

impl ZlibInflate {
    pub(crate) fn new(raw: bool) -> Self {
        Self {
            inner: Decompress::new(!raw),
            buf: vec![0u8; ENGINE_BUF_SIZE].into_boxed_slice(),
        }
    }
}

impl InflateEngine for ZlibInflate {
    fn feed(&mut self, input: &[u8], out: &mut ChunkQueue) -> Result<bool, FlateError> {
        let mut rest = input;
        loop {
            let before_in = self.inner.total_in();
            let before_out = self.inner.total_out();
            let status = self
                .inner
                .decompress(rest, &mut self.buf, FlushDecompress::None)
                .map_err(|e| FlateError::CorruptStream { msg: e.to_string() })?;
            let consumed = (self.inner.total_in() - before_in) as usize;
            let produced = (self.inner.total_out() - before_out) as usize;
            rest = &rest[consumed..];
            out.push(&self.buf[..produced]);

            match status {
                Status::StreamEnd => {
                    trace!(
                        "inflate stream complete: {} bytes in, {} bytes out",
                        self.inner.total_in(),
                        self.inner.total_out()
                    );
                    return Ok(true);
                }
                Status::Ok | Status::BufError => {
                    if consumed == 0 && produced == 0 {
                        if rest.is_empty() {
                            return Ok(false);
                        }
                        return Err(FlateError::CorruptStream {
                            msg: "inflate made no progress on pending input".into(),
                        });
                    }
                }
            }
        }
    }
}
