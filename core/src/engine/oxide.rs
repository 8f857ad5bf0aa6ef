//! Engine backend on top of miniz_oxide (pure Rust).
//!
//! Same contract as the flate2 backend, driven through the
//! `deflate::stream`/`inflate::stream` entry points. Useful on targets where
//! linking native zlib is unwanted.

use log::trace;
use miniz_oxide::deflate::core::{create_comp_flags_from_zip_params, CompressorOxide};
use miniz_oxide::inflate::stream::InflateState;
use miniz_oxide::{DataFormat, MZError, MZFlush, MZStatus};

use crate::constants::ENGINE_BUF_SIZE;
use crate::engine::{ChunkQueue, DeflateEngine, InflateEngine};
use crate::types::FlateError;

/// Window size exponent shared by both stream directions. Negative values
/// select the headerless format.
const WINDOW_BITS: i32 = 15;

pub(crate) struct OxideDeflate {
    inner: Box<CompressorOxide>,
    buf: Box<[u8]>,
}

impl OxideDeflate {
    pub(crate) fn new(raw: bool, level: u32) -> Self {
        let window_bits = if raw { -WINDOW_BITS } else { WINDOW_BITS };
        let flags = create_comp_flags_from_zip_params(level as i32, window_bits, 0);
        Self {
            inner: Box::new(CompressorOxide::new(flags)),
            buf: vec![0u8; ENGINE_BUF_SIZE].into_boxed_slice(),
        }
    }
}

impl DeflateEngine for OxideDeflate {
    fn feed(
        &mut self,
        input: &[u8],
        finish: bool,
        out: &mut ChunkQueue,
    ) -> Result<bool, FlateError> {
        let flush = if finish { MZFlush::Finish } else { MZFlush::None };
        let mut rest = input;
        loop {
            let res = miniz_oxide::deflate::stream::deflate(&mut self.inner, rest, &mut self.buf, flush);
            rest = &rest[res.bytes_consumed..];
            out.push(&self.buf[..res.bytes_written]);

            match res.status {
                Ok(MZStatus::StreamEnd) => {
                    trace!("deflate stream complete");
                    return Ok(true);
                }
                Ok(MZStatus::Ok) | Err(MZError::Buf) => {
                    if res.bytes_consumed == 0 && res.bytes_written == 0 {
                        if rest.is_empty() && !finish {
                            return Ok(false);
                        }
                        return Err(FlateError::Engine {
                            msg: "deflate engine made no progress".into(),
                        });
                    }
                }
                Ok(other) => {
                    return Err(FlateError::Engine {
                        msg: format!("unexpected deflate status: {other:?}"),
                    });
                }
                Err(e) => {
                    return Err(FlateError::Engine {
                        msg: format!("deflate failed: {e:?}"),
                    });
                }
            }
        }
    }
}

pub(crate) struct OxideInflate {
    inner: Box<InflateState>,
    buf: Box<[u8]>,
}

impl OxideInflate {
    pub(crate) fn new(raw: bool) -> Self {
        let format = if raw { DataFormat::Raw } else { DataFormat::Zlib };
        Self {
            inner: InflateState::new_boxed(format),
            buf: vec![0u8; ENGINE_BUF_SIZE].into_boxed_slice(),
        }
    }
}

impl InflateEngine for OxideInflate {
    fn feed(&mut self, input: &[u8], out: &mut ChunkQueue) -> Result<bool, FlateError> {
        let mut rest = input;
        loop {
            let res =
                miniz_oxide::inflate::stream::inflate(&mut self.inner, rest, &mut self.buf, MZFlush::None);
            rest = &rest[res.bytes_consumed..];
            out.push(&self.buf[..res.bytes_written]);

            match res.status {
                Ok(MZStatus::StreamEnd) => {
                    trace!("inflate stream complete");
                    return Ok(true);
                }
                Ok(MZStatus::Ok) | Err(MZError::Buf) => {
                    if res.bytes_consumed == 0 && res.bytes_written == 0 {
                        if rest.is_empty() {
                            return Ok(false);
                        }
                        return Err(FlateError::CorruptStream {
                            msg: "inflate made no progress on pending input".into(),
                        });
                    }
                }
                Ok(other) => {
                    return Err(FlateError::CorruptStream {
                        msg: format!("unexpected inflate status: {other:?}"),
                    });
                }
                Err(e) => {
                    return Err(FlateError::CorruptStream {
                        msg: format!("inflate failed: {e:?}"),
                    });
                }
            }
        }
    }
}
