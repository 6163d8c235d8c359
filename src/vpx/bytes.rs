use std::borrow::Cow;
use std::fmt;

use encoding_rs::WINDOWS_1252;

use crate::vpx::{Result, VpxError};

/// Bounded little-endian cursor over an immutable byte slice.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self::with_base(bytes, 0)
	}

	/// Create a cursor over a sub-slice whose first byte sits at `base` in the enclosing buffer.
	pub fn with_base(bytes: &'a [u8], base: usize) -> Self {
		Self { bytes, pos: 0, base }
	}

	/// Return current position relative to this cursor's slice.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return current position in the enclosing buffer.
	pub fn offset(&self) -> usize {
		self.base + self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return whether every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(VpxError::UnexpectedEof {
				at: self.offset(),
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Advance past `n` bytes without interpreting them.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		let _ = self.read_exact(n)?;
		Ok(())
	}

	/// Read a four-byte code.
	pub fn read_code4(&mut self) -> Result<[u8; 4]> {
		self.read_array()
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read an `N`-byte zero-terminated string field.
	///
	/// Stops at the first zero byte or after `capacity` bytes; bytes after the
	/// terminator are consumed but ignored.
	pub fn read_fixed_string(&mut self, capacity: usize) -> Result<String> {
		let raw = self.read_exact(capacity)?;
		let end = raw.iter().position(|byte| *byte == 0).unwrap_or(raw.len());
		Ok(decode_ansi(&raw[..end]))
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}
}

/// Growable little-endian byte sink mirroring [`Cursor`].
#[derive(Debug, Clone, Default)]
pub struct Writer {
	bytes: Vec<u8>,
}

impl Writer {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return number of bytes written so far.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return whether nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Borrow written bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consume the writer and return written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Append raw bytes.
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.bytes.extend_from_slice(bytes);
	}

	/// Append one byte.
	pub fn write_u8(&mut self, value: u8) {
		self.bytes.push(value);
	}

	/// Append a little-endian `u32`.
	pub fn write_u32_le(&mut self, value: u32) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Append a little-endian `i32`.
	pub fn write_i32_le(&mut self, value: i32) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Append a little-endian `f32`.
	pub fn write_f32_le(&mut self, value: f32) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Append `n` zero bytes.
	pub fn write_zeros(&mut self, n: usize) {
		self.bytes.resize(self.bytes.len() + n, 0);
	}

	/// Append `value` zero-padded to exactly `capacity` bytes.
	///
	/// One byte is always reserved for the terminator, so values of `capacity`
	/// bytes or more are rejected before anything is written.
	pub fn write_fixed_string(&mut self, field: &'static str, value: &str, capacity: usize) -> Result<()> {
		let raw = encode_ansi(field, value)?;
		if raw.len() >= capacity {
			return Err(VpxError::UnsupportedPayload {
				field,
				len: raw.len(),
				capacity,
			});
		}

		self.write_bytes(&raw);
		self.write_zeros(capacity - raw.len());
		Ok(())
	}
}

/// Decode single-byte Windows-1252 text. Every byte maps to exactly one char.
pub(crate) fn decode_ansi(raw: &[u8]) -> String {
	WINDOWS_1252.decode_without_bom_handling(raw).0.into_owned()
}

/// Encode text as Windows-1252, rejecting chars the code page cannot hold.
pub(crate) fn encode_ansi(field: impl fmt::Display, value: &str) -> Result<Cow<'_, [u8]>> {
	let (raw, _, unmappable) = WINDOWS_1252.encode(value);
	if unmappable {
		return Err(VpxError::UnencodableText {
			field: field.to_string(),
			text: value.to_owned(),
		});
	}
	Ok(raw)
}
