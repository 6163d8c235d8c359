use std::fmt;

use serde::{Serialize, Serializer};

use crate::vpx::bytes::encode_ansi;
use crate::vpx::{Cursor, Result, VpxError, Writer};

/// Four-byte chunk tag such as `NAME` or `ENDB`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub [u8; 4]);

impl Tag {
	/// Terminator closing an item's chunk stream.
	pub const ENDB: Tag = Tag(*b"ENDB");

	/// Wrap a four-byte code.
	pub const fn new(code: &[u8; 4]) -> Self {
		Self(*code)
	}

	/// Parse a user-provided ASCII tag of exactly four characters.
	pub fn parse(text: &str) -> Result<Self> {
		let raw = text.as_bytes();
		if raw.len() != 4 || !text.is_ascii() {
			return Err(VpxError::InvalidTag { tag: text.to_owned() });
		}

		let mut code = [0_u8; 4];
		code.copy_from_slice(raw);
		Ok(Self(code))
	}

	/// Return whether this is the stream terminator.
	pub fn is_end(self) -> bool {
		self == Self::ENDB
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.0 {
			if byte.is_ascii_graphic() || byte == b' ' {
				write!(f, "{}", char::from(byte))?;
			} else {
				f.write_str(".")?;
			}
		}
		Ok(())
	}
}

impl fmt::Debug for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Tag({self})")
	}
}

impl Serialize for Tag {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// One chunk: tag plus its declared-length payload.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
	/// Chunk tag.
	pub tag: Tag,
	/// Payload bytes (declared length minus the tag).
	pub payload: &'a [u8],
	/// Offset of the chunk's length field in the enclosing buffer.
	pub offset: usize,
}

impl Chunk<'_> {
	/// Size of the length field plus the tag.
	pub const HEADER_LEN: usize = 8;

	/// Offset of the first payload byte in the enclosing buffer.
	pub fn payload_offset(&self) -> usize {
		self.offset + Self::HEADER_LEN
	}
}

/// Read one chunk header and its payload, advancing past both.
///
/// Chunk layout: `i32` length counting the tag and payload, 4-byte tag, payload.
pub fn read_chunk<'a>(cursor: &mut Cursor<'a>, item: &'static str, max_len: usize) -> Result<Chunk<'a>> {
	let offset = cursor.offset();
	let len = cursor.read_i32_le()?;
	if len < 4 {
		return Err(VpxError::InvalidChunkLength { item, at: offset, len });
	}

	let tag = Tag(cursor.read_code4()?);
	let payload_len = (len - 4) as usize;
	if payload_len > max_len {
		return Err(VpxError::ChunkTooLarge {
			item,
			tag,
			at: offset,
			len: payload_len,
			max: max_len,
		});
	}

	let rem = cursor.remaining();
	if payload_len > rem {
		return Err(VpxError::ChunkLenOutOfRange {
			item,
			tag,
			at: offset,
			len: payload_len,
			rem,
		});
	}

	let payload = cursor.read_exact(payload_len)?;
	Ok(Chunk { tag, payload, offset })
}

/// Flat iterator over consecutive chunks, ending after `ENDB` or at end of data.
pub struct ChunkIter<'a> {
	cursor: Cursor<'a>,
	max_len: usize,
	stop_at_end: bool,
	done: bool,
}

impl<'a> ChunkIter<'a> {
	/// Iterate chunks of `bytes`, stopping after the first `ENDB`.
	pub fn new(bytes: &'a [u8], max_len: usize) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			max_len,
			stop_at_end: true,
			done: false,
		}
	}

	/// Keep iterating past `ENDB` chunks; nested sub-records end with their own terminator.
	pub fn through_terminators(mut self) -> Self {
		self.stop_at_end = false;
		self
	}
}

impl<'a> Iterator for ChunkIter<'a> {
	type Item = Result<Chunk<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		if self.cursor.is_empty() {
			self.done = true;
			return None;
		}

		let chunk = match read_chunk(&mut self.cursor, "stream", self.max_len) {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		if chunk.tag.is_end() && self.stop_at_end {
			self.done = true;
		}

		Some(Ok(chunk))
	}
}

/// Chunk stream writer; the mirror of [`read_chunk`].
#[derive(Debug, Default)]
pub struct BiffWriter {
	writer: Writer,
}

impl BiffWriter {
	/// Create an empty chunk writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Borrow written bytes.
	pub fn as_bytes(&self) -> &[u8] {
		self.writer.as_bytes()
	}

	/// Consume the writer and return written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.writer.into_bytes()
	}

	/// Write a chunk with a raw payload.
	pub fn write_chunk(&mut self, tag: Tag, payload: &[u8]) {
		self.writer.write_i32_le((payload.len() + 4) as i32);
		self.writer.write_bytes(&tag.0);
		self.writer.write_bytes(payload);
	}

	/// Write a payload-less chunk, used for markers and nested-record openers.
	pub fn write_tag(&mut self, tag: Tag) {
		self.write_chunk(tag, &[]);
	}

	/// Write the `ENDB` terminator.
	pub fn write_end(&mut self) {
		self.write_tag(Tag::ENDB);
	}

	/// Write a little-endian `f32` chunk.
	pub fn write_f32(&mut self, tag: Tag, value: f32) {
		self.write_chunk(tag, &value.to_le_bytes());
	}

	/// Write a little-endian `i32` chunk.
	pub fn write_i32(&mut self, tag: Tag, value: i32) {
		self.write_chunk(tag, &value.to_le_bytes());
	}

	/// Write a boolean as a 4-byte integer chunk.
	pub fn write_bool(&mut self, tag: Tag, value: bool) {
		self.write_i32(tag, i32::from(value));
	}

	/// Write two consecutive floats.
	pub fn write_vec2(&mut self, tag: Tag, x: f32, y: f32) {
		let mut payload = [0_u8; 8];
		payload[..4].copy_from_slice(&x.to_le_bytes());
		payload[4..].copy_from_slice(&y.to_le_bytes());
		self.write_chunk(tag, &payload);
	}

	/// Write a length-prefixed Windows-1252 string.
	pub fn write_string(&mut self, tag: Tag, value: &str) -> Result<()> {
		let raw = encode_ansi(tag, value)?;
		let mut payload = Writer::new();
		payload.write_i32_le(raw.len() as i32);
		payload.write_bytes(&raw);
		self.write_chunk(tag, payload.as_bytes());
		Ok(())
	}

	/// Write a byte-length-prefixed UTF-16LE string.
	pub fn write_wide_string(&mut self, tag: Tag, value: &str) {
		let mut payload = Writer::new();
		let units: Vec<u16> = value.encode_utf16().collect();
		payload.write_i32_le((units.len() * 2) as i32);
		for unit in units {
			payload.write_bytes(&unit.to_le_bytes());
		}
		self.write_chunk(tag, payload.as_bytes());
	}

	/// Append an already encoded chunk stream.
	pub fn write_raw(&mut self, bytes: &[u8]) {
		self.writer.write_bytes(bytes);
	}
}
