//! Public library API for reading and writing Visual Pinball table records.

/// Chunked (BIFF) record codec, fixed records, items, and blobs.
pub mod vpx;
