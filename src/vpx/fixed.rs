use std::fmt;

use log::warn;

use crate::vpx::{Cursor, DecodeOptions, Result, VpxError, Writer};

/// Layout rule broken by a malformed fixed-size record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFault {
	/// Fewer bytes were available than the declared record size.
	Truncated,
	/// Declared size was not fully consumed by the record's fields.
	Leftover,
	/// Reserved alignment bytes were not zero.
	NonZeroPadding,
	/// Encoded fields did not add up to the declared size.
	SizeMismatch,
}

impl RecordFault {
	/// Render fault as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Truncated => "truncated",
			Self::Leftover => "leftover",
			Self::NonZeroPadding => "non_zero_padding",
			Self::SizeMismatch => "size_mismatch",
		}
	}
}

impl fmt::Display for RecordFault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Flat record with a compile-time total byte size.
///
/// Implementors only describe their field sequence; [`decode_fixed`] and
/// [`encode_fixed`] own the size accounting.
pub trait FixedRecord: Sized {
	/// Record type name used in errors.
	const NAME: &'static str;
	/// Declared total byte size.
	const SIZE: usize;

	/// Read fields in declaration order.
	fn read_fields(reader: &mut FieldReader<'_, '_>) -> Result<Self>;

	/// Write fields in declaration order.
	fn write_fields(&self, writer: &mut FieldWriter<'_>) -> Result<()>;
}

/// Field-level reader handed to [`FixedRecord::read_fields`].
pub struct FieldReader<'c, 'a> {
	cursor: &'c mut Cursor<'a>,
	record: &'static str,
	strict_padding: bool,
}

impl FieldReader<'_, '_> {
	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		self.cursor.read_i32_le()
	}

	/// Read a little-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		self.cursor.read_f32_le()
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		self.cursor.read_u8()
	}

	/// Read a zero-terminated string occupying `capacity` bytes.
	pub fn read_string(&mut self, capacity: usize) -> Result<String> {
		self.cursor.read_fixed_string(capacity)
	}

	/// Skip `n` reserved alignment bytes.
	pub fn padding(&mut self, n: usize) -> Result<()> {
		let at = self.cursor.offset();
		let raw = self.cursor.read_exact(n)?;
		let dirty = raw.iter().filter(|byte| **byte != 0).count();
		if dirty == 0 {
			return Ok(());
		}

		if self.strict_padding {
			return Err(VpxError::MalformedFixedRecord {
				record: self.record,
				at,
				delta: dirty as i64,
				fault: RecordFault::NonZeroPadding,
			});
		}
		warn!("{}: ignoring {dirty} non-zero padding bytes at offset {at}", self.record);
		Ok(())
	}
}

/// Field-level writer handed to [`FixedRecord::write_fields`].
pub struct FieldWriter<'w> {
	writer: &'w mut Writer,
}

impl FieldWriter<'_> {
	/// Write a little-endian `i32`.
	pub fn write_i32(&mut self, value: i32) {
		self.writer.write_i32_le(value);
	}

	/// Write a little-endian `f32`.
	pub fn write_f32(&mut self, value: f32) {
		self.writer.write_f32_le(value);
	}

	/// Write one byte.
	pub fn write_u8(&mut self, value: u8) {
		self.writer.write_u8(value);
	}

	/// Write `value` zero-padded to `capacity` bytes.
	pub fn write_string(&mut self, field: &'static str, value: &str, capacity: usize) -> Result<()> {
		self.writer.write_fixed_string(field, value, capacity)
	}

	/// Write `n` zero alignment bytes.
	pub fn padding(&mut self, n: usize) {
		self.writer.write_zeros(n);
	}
}

/// Decode one fixed record and leave `cursor` exactly `R::SIZE` bytes further.
pub fn decode_fixed<R: FixedRecord>(cursor: &mut Cursor<'_>, options: &DecodeOptions) -> Result<R> {
	let at = cursor.offset();
	if cursor.remaining() < R::SIZE {
		return Err(VpxError::MalformedFixedRecord {
			record: R::NAME,
			at,
			delta: cursor.remaining() as i64 - R::SIZE as i64,
			fault: RecordFault::Truncated,
		});
	}

	let bytes = cursor.read_exact(R::SIZE)?;
	let mut inner = Cursor::with_base(bytes, at);
	let record = R::read_fields(&mut FieldReader {
		cursor: &mut inner,
		record: R::NAME,
		strict_padding: options.strict_padding,
	})?;

	if !inner.is_empty() {
		return Err(VpxError::MalformedFixedRecord {
			record: R::NAME,
			at,
			delta: inner.remaining() as i64,
			fault: RecordFault::Leftover,
		});
	}

	Ok(record)
}

/// Encode one fixed record, appending exactly `R::SIZE` bytes.
///
/// Nothing is appended when a field is rejected.
pub fn encode_fixed<R: FixedRecord>(record: &R, writer: &mut Writer) -> Result<()> {
	let mut scratch = Writer::new();
	record.write_fields(&mut FieldWriter { writer: &mut scratch })?;

	if scratch.len() != R::SIZE {
		return Err(VpxError::MalformedFixedRecord {
			record: R::NAME,
			at: writer.len(),
			delta: R::SIZE as i64 - scratch.len() as i64,
			fault: RecordFault::SizeMismatch,
		});
	}

	writer.write_bytes(scratch.as_bytes());
	Ok(())
}

/// Decode `count` back-to-back records filling `payload` exactly.
pub fn decode_fixed_table<R: FixedRecord>(payload: &[u8], count: usize, options: &DecodeOptions) -> Result<Vec<R>> {
	let expected = count.saturating_mul(R::SIZE);
	if payload.len() != expected {
		let delta = payload.len() as i64 - expected as i64;
		return Err(VpxError::MalformedFixedRecord {
			record: R::NAME,
			at: 0,
			delta,
			fault: if delta > 0 { RecordFault::Leftover } else { RecordFault::Truncated },
		});
	}

	let mut cursor = Cursor::new(payload);
	let mut records = Vec::with_capacity(count);
	for _ in 0..count {
		records.push(decode_fixed(&mut cursor, options)?);
	}
	Ok(records)
}

/// Encode records back-to-back.
pub fn encode_fixed_table<R: FixedRecord>(records: &[R]) -> Result<Vec<u8>> {
	let mut writer = Writer::new();
	for record in records {
		encode_fixed(record, &mut writer)?;
	}
	Ok(writer.into_bytes())
}
