use log::{debug, warn};

use crate::vpx::bytes::decode_ansi;
use crate::vpx::{BiffWriter, Chunk, Cursor, DecodeOptions, Result, Tag, VpxError, read_chunk};

/// Tags whose tag-only chunk is followed by a nested item stream with its own `ENDB`.
const NESTED_OPENERS: [Tag; 2] = [Tag(*b"DPNT"), Tag(*b"JPEG")];

/// How one tag's payload maps onto a field of `T`.
pub enum Field<T: 'static> {
	/// Little-endian `f32`.
	Float {
		/// Read the current value.
		get: fn(&T) -> f32,
		/// Store a decoded value.
		set: fn(&mut T, f32),
	},
	/// Little-endian `i32`.
	Int {
		/// Read the current value.
		get: fn(&T) -> i32,
		/// Store a decoded value.
		set: fn(&mut T, i32),
	},
	/// One byte or a 4-byte integer on read, always 4 bytes on write.
	Bool {
		/// Read the current value.
		get: fn(&T) -> bool,
		/// Store a decoded value.
		set: fn(&mut T, bool),
	},
	/// Two consecutive `f32` values.
	Vec2 {
		/// Read the current value.
		get: fn(&T) -> (f32, f32),
		/// Store a decoded value.
		set: fn(&mut T, f32, f32),
	},
	/// `i32` byte length followed by Windows-1252 text.
	Str {
		/// Read the current value.
		get: fn(&T) -> &str,
		/// Store a decoded value.
		set: fn(&mut T, String),
	},
	/// `i32` byte length followed by UTF-16LE text.
	WideStr {
		/// Read the current value.
		get: fn(&T) -> &str,
		/// Store a decoded value.
		set: fn(&mut T, String),
	},
	/// Whole chunk payload as opaque bytes.
	Bytes {
		/// Read the current value.
		get: fn(&T) -> &[u8],
		/// Store a decoded value.
		set: fn(&mut T, Vec<u8>),
	},
	/// Payload-less chunk written when `present` holds; ignored on read.
	Marker {
		/// Whether the marker is emitted.
		present: fn(&T) -> bool,
	},
	/// Each occurrence appends one nested item to an ordered sequence.
	List {
		/// Decode one nested element and append it.
		decode: fn(&mut T, &mut NestedReader<'_, '_>) -> Result<()>,
		/// Emit every element, each as opener tag plus nested stream.
		encode: fn(&T, &mut BiffWriter) -> Result<()>,
	},
	/// A single optional nested item.
	Record {
		/// Decode the nested item and store it.
		decode: fn(&mut T, &mut NestedReader<'_, '_>) -> Result<()>,
		/// Emit the opener tag plus nested stream when the item is present.
		encode: fn(&T, &mut BiffWriter) -> Result<()>,
	},
}

/// One row of an item's tag table.
pub struct TagSpec<T: 'static> {
	/// Chunk tag.
	pub tag: Tag,
	/// Payload handler.
	pub field: Field<T>,
}

impl<T: 'static> TagSpec<T> {
	/// `f32` field.
	pub const fn float(tag: &[u8; 4], get: fn(&T) -> f32, set: fn(&mut T, f32)) -> Self {
		Self::new(tag, Field::Float { get, set })
	}

	/// `i32` field.
	pub const fn int(tag: &[u8; 4], get: fn(&T) -> i32, set: fn(&mut T, i32)) -> Self {
		Self::new(tag, Field::Int { get, set })
	}

	/// Boolean field.
	pub const fn boolean(tag: &[u8; 4], get: fn(&T) -> bool, set: fn(&mut T, bool)) -> Self {
		Self::new(tag, Field::Bool { get, set })
	}

	/// Two-float field.
	pub const fn vec2(tag: &[u8; 4], get: fn(&T) -> (f32, f32), set: fn(&mut T, f32, f32)) -> Self {
		Self::new(tag, Field::Vec2 { get, set })
	}

	/// Windows-1252 string field.
	pub const fn string(tag: &[u8; 4], get: fn(&T) -> &str, set: fn(&mut T, String)) -> Self {
		Self::new(tag, Field::Str { get, set })
	}

	/// UTF-16LE string field.
	pub const fn wide_string(tag: &[u8; 4], get: fn(&T) -> &str, set: fn(&mut T, String)) -> Self {
		Self::new(tag, Field::WideStr { get, set })
	}

	/// Raw payload field.
	pub const fn bytes(tag: &[u8; 4], get: fn(&T) -> &[u8], set: fn(&mut T, Vec<u8>)) -> Self {
		Self::new(tag, Field::Bytes { get, set })
	}

	/// Payload-less marker.
	pub const fn marker(tag: &[u8; 4], present: fn(&T) -> bool) -> Self {
		Self::new(tag, Field::Marker { present })
	}

	/// Repeated nested item.
	pub const fn list(
		tag: &[u8; 4],
		decode: fn(&mut T, &mut NestedReader<'_, '_>) -> Result<()>,
		encode: fn(&T, &mut BiffWriter) -> Result<()>,
	) -> Self {
		Self::new(tag, Field::List { decode, encode })
	}

	/// Optional nested item.
	pub const fn record(
		tag: &[u8; 4],
		decode: fn(&mut T, &mut NestedReader<'_, '_>) -> Result<()>,
		encode: fn(&T, &mut BiffWriter) -> Result<()>,
	) -> Self {
		Self::new(tag, Field::Record { decode, encode })
	}

	const fn new(tag: &[u8; 4], field: Field<T>) -> Self {
		Self { tag: Tag(*tag), field }
	}

	fn is_scalar(&self) -> bool {
		!matches!(self.field, Field::Marker { .. } | Field::List { .. } | Field::Record { .. })
	}
}

/// Item stored as a tagged chunk stream.
///
/// Field order in [`BiffItem::fields`] is the order fields are written in.
pub trait BiffItem: Default + Sized + 'static {
	/// Item name used in errors and logs.
	const NAME: &'static str;

	/// Tag table for this item.
	fn fields() -> &'static [TagSpec<Self>];
}

/// Handle passed to nested decoders; continues reading the enclosing stream.
pub struct NestedReader<'c, 'a> {
	cursor: &'c mut Cursor<'a>,
	options: &'c DecodeOptions,
	depth: u32,
}

impl NestedReader<'_, '_> {
	/// Decode one nested item, which must end with its own `ENDB`.
	pub fn decode<U: BiffItem>(&mut self) -> Result<U> {
		decode_item_from(self.cursor, self.options, self.depth)
	}
}

/// Return whether a tag-only `tag` chunk is followed by a nested item stream.
pub fn opens_nested_record(tag: Tag) -> bool {
	NESTED_OPENERS.contains(&tag)
}

/// Decode a top-level item stream; `ENDB` or end of data both finish the item.
pub fn decode_item<T: BiffItem>(bytes: &[u8], options: &DecodeOptions) -> Result<T> {
	let mut cursor = Cursor::new(bytes);
	decode_item_from(&mut cursor, options, 0)
}

/// Decode one item from `cursor`, leaving it just past the item's `ENDB`.
///
/// At `depth > 0` the stream must be closed by `ENDB`; running out of data is an error.
pub fn decode_item_from<T: BiffItem>(cursor: &mut Cursor<'_>, options: &DecodeOptions, depth: u32) -> Result<T> {
	if depth > options.max_nesting {
		return Err(VpxError::NestingTooDeep {
			item: T::NAME,
			max: options.max_nesting,
		});
	}

	let start = cursor.offset();
	let mut item = T::default();
	let mut seen: Vec<Tag> = Vec::new();

	loop {
		if cursor.is_empty() {
			if depth > 0 {
				return Err(VpxError::UnterminatedRecord { item: T::NAME, at: start });
			}
			break;
		}

		let chunk = read_chunk(cursor, T::NAME, options.max_chunk_len)?;
		if chunk.tag.is_end() {
			break;
		}

		let Some(entry) = T::fields().iter().find(|entry| entry.tag == chunk.tag) else {
			debug!(
				"{}: skipping unknown tag {} ({} bytes) at offset {}",
				T::NAME,
				chunk.tag,
				chunk.payload.len(),
				chunk.offset
			);
			continue;
		};

		if entry.is_scalar() {
			if seen.contains(&chunk.tag) {
				warn!("{}: duplicate tag {} at offset {}, keeping the later value", T::NAME, chunk.tag, chunk.offset);
			} else {
				seen.push(chunk.tag);
			}
		}

		match &entry.field {
			Field::List { decode, .. } | Field::Record { decode, .. } => {
				if !chunk.payload.is_empty() {
					debug!("{}: ignoring {} payload bytes on opener {}", T::NAME, chunk.payload.len(), chunk.tag);
				}
				let mut nested = NestedReader {
					cursor: &mut *cursor,
					options,
					depth: depth + 1,
				};
				decode(&mut item, &mut nested)?;
			}
			field => apply_payload(&mut item, field, T::NAME, &chunk)?,
		}
	}

	Ok(item)
}

fn apply_payload<T: 'static>(item: &mut T, field: &Field<T>, name: &'static str, chunk: &Chunk<'_>) -> Result<()> {
	let payload = PayloadReader { chunk, item: name };

	match field {
		Field::Float { set, .. } => set(item, f32::from_le_bytes(payload.array()?)),
		Field::Int { set, .. } => set(item, i32::from_le_bytes(payload.array()?)),
		Field::Bool { set, .. } => {
			let value = if chunk.payload.len() == 1 {
				chunk.payload[0] != 0
			} else {
				i32::from_le_bytes(payload.array()?) != 0
			};
			set(item, value);
		}
		Field::Vec2 { set, .. } => {
			let raw: [u8; 8] = payload.array()?;
			let x = f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
			let y = f32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
			set(item, x, y);
		}
		Field::Str { set, .. } => {
			let raw = payload.prefixed()?;
			set(item, decode_ansi(raw));
		}
		Field::WideStr { set, .. } => {
			let raw = payload.prefixed()?;
			if raw.len() % 2 != 0 {
				return Err(VpxError::InvalidWideString {
					item: name,
					tag: chunk.tag,
					at: chunk.offset,
					len: raw.len(),
				});
			}
			let units: Vec<u16> = raw.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
			set(item, String::from_utf16_lossy(&units));
		}
		Field::Bytes { set, .. } => set(item, chunk.payload.to_vec()),
		Field::Marker { .. } | Field::List { .. } | Field::Record { .. } => {}
	}

	Ok(())
}

struct PayloadReader<'c, 'a> {
	chunk: &'c Chunk<'a>,
	item: &'static str,
}

impl<'a> PayloadReader<'_, 'a> {
	fn too_small(&self, need: usize) -> VpxError {
		VpxError::ChunkPayloadTooSmall {
			item: self.item,
			tag: self.chunk.tag,
			at: self.chunk.offset,
			need,
			have: self.chunk.payload.len(),
		}
	}

	fn array<const N: usize>(&self) -> Result<[u8; N]> {
		let mut cursor = Cursor::with_base(self.chunk.payload, self.chunk.payload_offset());
		let raw = cursor.read_exact(N).map_err(|_| self.too_small(N))?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	fn prefixed(&self) -> Result<&'a [u8]> {
		let mut cursor = Cursor::with_base(self.chunk.payload, self.chunk.payload_offset());
		let declared = cursor.read_i32_le().map_err(|_| self.too_small(4))?;
		let len = usize::try_from(declared).map_err(|_| VpxError::InvalidChunkLength {
			item: self.item,
			at: self.chunk.offset,
			len: declared,
		})?;
		cursor.read_exact(len).map_err(|_| self.too_small(4 + len))
	}
}

/// Write `item` as a chunk stream closed by `ENDB`.
///
/// Fields equal to their default value are omitted.
pub fn write_item<T: BiffItem>(item: &T, writer: &mut BiffWriter) -> Result<()> {
	let defaults = T::default();

	for entry in T::fields() {
		let tag = entry.tag;
		match &entry.field {
			Field::Float { get, .. } => {
				let value = get(item);
				if value.to_bits() != get(&defaults).to_bits() {
					writer.write_f32(tag, value);
				}
			}
			Field::Int { get, .. } => {
				let value = get(item);
				if value != get(&defaults) {
					writer.write_i32(tag, value);
				}
			}
			Field::Bool { get, .. } => {
				let value = get(item);
				if value != get(&defaults) {
					writer.write_bool(tag, value);
				}
			}
			Field::Vec2 { get, .. } => {
				let (x, y) = get(item);
				let (dx, dy) = get(&defaults);
				if x.to_bits() != dx.to_bits() || y.to_bits() != dy.to_bits() {
					writer.write_vec2(tag, x, y);
				}
			}
			Field::Str { get, .. } => {
				let value = get(item);
				if value != get(&defaults) {
					writer.write_string(tag, value)?;
				}
			}
			Field::WideStr { get, .. } => {
				let value = get(item);
				if value != get(&defaults) {
					writer.write_wide_string(tag, value);
				}
			}
			Field::Bytes { get, .. } => {
				let value = get(item);
				if value != get(&defaults) {
					writer.write_chunk(tag, value);
				}
			}
			Field::Marker { present } => {
				if present(item) {
					writer.write_tag(tag);
				}
			}
			Field::List { encode, .. } | Field::Record { encode, .. } => encode(item, writer)?,
		}
	}

	writer.write_end();
	Ok(())
}

/// Encode `item` into a fresh buffer.
pub fn encode_item<T: BiffItem>(item: &T) -> Result<Vec<u8>> {
	let mut writer = BiffWriter::new();
	write_item(item, &mut writer)?;
	Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests;
