//! flate-core
//!
//! Streaming deflate/inflate over pull-based byte streams, independent of
//! the underlying codec engine.
//!
//! The crate bridges two I/O models: callers pull transformed bytes through
//! [`Deflater`]/[`Inflater`] (or the [`Read`](std::io::Read) adapters built
//! on them), while the codec engine underneath is push/drain. Both raw
//! deflate and zlib-framed streams are supported, bit-compatible with
//! standard zlib.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

// Codec engine seam (backend selected by cargo features)
pub mod engine;

// State machines and one-shot helpers
pub mod deflate;
pub mod inflate;

// Pull-based stream adapters
pub mod stream;

pub use constants::{DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, MAX_LEVEL};
pub use deflate::{deflate, deflate_with, Deflater};
pub use inflate::{inflate, inflate_with, Inflater};
pub use stream::{DeflatingReader, FlateExt, InflatingReader};
pub use types::FlateError;
