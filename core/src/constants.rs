//! Levels, chunk sizes, and sanity bounds.

/// Default compression level (balanced).
pub const DEFAULT_LEVEL: u32 = 6;

/// Highest supported compression level. 0 stores, 9 compresses hardest.
pub const MAX_LEVEL: u32 = 9;

/// Default buffer granularity for stream adapters and one-shot helpers.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Scratch buffer size used when draining a codec engine.
pub(crate) const ENGINE_BUF_SIZE: usize = 32 * 1024;
