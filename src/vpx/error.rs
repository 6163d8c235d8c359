use thiserror::Error;

use crate::vpx::{RecordFault, Tag};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, VpxError>;

/// Errors produced while reading and writing table records.
#[derive(Debug, Error)]
pub enum VpxError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Image encoding failure while producing a standalone file view.
	#[error("image: {0}")]
	Image(#[from] image::ImageError),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Fixed-size record did not occupy exactly its declared size.
	#[error("malformed fixed record {record} at offset {at}: {fault} (delta={delta})")]
	MalformedFixedRecord {
		/// Record type name.
		record: &'static str,
		/// Byte offset of the record start (or of the offending padding run).
		at: usize,
		/// Byte delta; positive is unconsumed bytes, negative is missing bytes.
		delta: i64,
		/// Which layout rule was broken.
		fault: RecordFault,
	},
	/// Value does not fit the fixed capacity it must be written into.
	#[error("payload for {field} is {len} bytes, capacity {capacity} (terminator included)")]
	UnsupportedPayload {
		/// Field being encoded.
		field: &'static str,
		/// Encoded byte length of the value.
		len: usize,
		/// Fixed capacity of the field.
		capacity: usize,
	},
	/// Text holds chars outside the single-byte code page.
	#[error("text for {field} cannot be stored as Windows-1252: {text:?}")]
	UnencodableText {
		/// Field or tag being encoded.
		field: String,
		/// Offending value.
		text: String,
	},
	/// Chunk length field smaller than its own tag.
	#[error("invalid chunk length {len} in {item} at offset {at}")]
	InvalidChunkLength {
		/// Item being decoded.
		item: &'static str,
		/// Chunk header offset.
		at: usize,
		/// Parsed signed length.
		len: i32,
	},
	/// Chunk payload would exceed remaining data.
	#[error("chunk {tag} in {item} at offset {at}: length {len} exceeds remaining {rem}")]
	ChunkLenOutOfRange {
		/// Item being decoded.
		item: &'static str,
		/// Chunk tag.
		tag: Tag,
		/// Chunk header offset.
		at: usize,
		/// Declared payload length.
		len: usize,
		/// Bytes left in the buffer after the chunk header.
		rem: usize,
	},
	/// Chunk payload exceeded the configured size limit.
	#[error("chunk {tag} in {item} at offset {at}: length {len} exceeds limit {max}")]
	ChunkTooLarge {
		/// Item being decoded.
		item: &'static str,
		/// Chunk tag.
		tag: Tag,
		/// Chunk header offset.
		at: usize,
		/// Declared payload length.
		len: usize,
		/// Configured maximum.
		max: usize,
	},
	/// Chunk payload too short for the field type its tag maps to.
	#[error("chunk {tag} in {item} at offset {at}: payload {have} bytes, need {need}")]
	ChunkPayloadTooSmall {
		/// Item being decoded.
		item: &'static str,
		/// Chunk tag.
		tag: Tag,
		/// Chunk header offset.
		at: usize,
		/// Bytes required by the field type.
		need: usize,
		/// Bytes available in the payload.
		have: usize,
	},
	/// Wide string payload had an odd byte length.
	#[error("chunk {tag} in {item} at offset {at}: wide string has odd byte length {len}")]
	InvalidWideString {
		/// Item being decoded.
		item: &'static str,
		/// Chunk tag.
		tag: Tag,
		/// Chunk header offset.
		at: usize,
		/// Declared byte length.
		len: usize,
	},
	/// Nested record stream ended before its `ENDB` terminator.
	#[error("nested {item} starting at offset {at} is missing its ENDB terminator")]
	UnterminatedRecord {
		/// Nested item type.
		item: &'static str,
		/// Offset where the nested stream started.
		at: usize,
	},
	/// Nested sub-records exceeded configured depth.
	#[error("nested {item} exceeds max nesting depth {max}")]
	NestingTooDeep {
		/// Item that would have been decoded.
		item: &'static str,
		/// Configured depth ceiling.
		max: u32,
	},
	/// Bitmap pixel buffer does not match its dimensions.
	#[error("bitmap {width}x{height} expects 4 bytes per pixel, got {len} bytes")]
	InvalidBitmap {
		/// Declared width in pixels.
		width: u32,
		/// Declared height in pixels.
		height: u32,
		/// Pixel buffer length.
		len: usize,
	},
	/// Item-type prefix is not a known item kind.
	#[error("unknown item type {value}")]
	UnknownItemType {
		/// Raw item type value.
		value: u32,
	},
	/// Tag text was not exactly four ASCII characters.
	#[error("invalid tag: {tag}")]
	InvalidTag {
		/// Rejected tag text.
		tag: String,
	},
}
