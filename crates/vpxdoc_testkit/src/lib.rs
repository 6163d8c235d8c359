//! Shared test helpers: raw chunk streams built without the codec under test.

/// Appends length-prefixed chunks exactly as a table writer lays them out.
#[derive(Debug, Default, Clone)]
pub struct StreamBuilder {
	bytes: Vec<u8>,
}

impl StreamBuilder {
	/// Start an empty stream.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a chunk with an arbitrary payload.
	pub fn raw(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
		self.bytes.extend_from_slice(&((payload.len() + 4) as i32).to_le_bytes());
		self.bytes.extend_from_slice(tag);
		self.bytes.extend_from_slice(payload);
		self
	}

	/// Append a payload-less chunk.
	pub fn tag_only(self, tag: &[u8; 4]) -> Self {
		self.raw(tag, &[])
	}

	/// Append an `f32` chunk.
	pub fn f32(self, tag: &[u8; 4], value: f32) -> Self {
		self.raw(tag, &value.to_le_bytes())
	}

	/// Append an `i32` chunk.
	pub fn i32(self, tag: &[u8; 4], value: i32) -> Self {
		self.raw(tag, &value.to_le_bytes())
	}

	/// Append a 4-byte boolean chunk.
	pub fn bool(self, tag: &[u8; 4], value: bool) -> Self {
		self.i32(tag, i32::from(value))
	}

	/// Append a two-float chunk.
	pub fn vec2(self, tag: &[u8; 4], x: f32, y: f32) -> Self {
		let mut payload = x.to_le_bytes().to_vec();
		payload.extend_from_slice(&y.to_le_bytes());
		self.raw(tag, &payload)
	}

	/// Append a length-prefixed single-byte string chunk.
	pub fn string(self, tag: &[u8; 4], value: &str) -> Self {
		let mut payload = (value.len() as i32).to_le_bytes().to_vec();
		payload.extend_from_slice(value.as_bytes());
		self.raw(tag, &payload)
	}

	/// Append a byte-length-prefixed UTF-16LE string chunk.
	pub fn wide_string(self, tag: &[u8; 4], value: &str) -> Self {
		let units: Vec<u8> = value.encode_utf16().flat_map(u16::to_le_bytes).collect();
		let mut payload = (units.len() as i32).to_le_bytes().to_vec();
		payload.extend_from_slice(&units);
		self.raw(tag, &payload)
	}

	/// Append another stream verbatim.
	pub fn nested(mut self, stream: &[u8]) -> Self {
		self.bytes.extend_from_slice(stream);
		self
	}

	/// Append the `ENDB` terminator.
	pub fn end(self) -> Self {
		self.tag_only(b"ENDB")
	}

	/// Return the built bytes.
	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}
}

/// Drag point stream (without its `DPNT` opener) at `(x, y)`.
pub fn drag_point(x: f32, y: f32) -> Vec<u8> {
	StreamBuilder::new()
		.vec2(b"VCEN", x, y)
		.f32(b"POSZ", 0.0)
		.bool(b"SMTH", true)
		.bool(b"ATEX", true)
		.string(b"LANR", "Layer 1")
		.end()
		.finish()
}

/// Rubber stream as the editor writes it: every field present, three drag points.
pub fn rubber_fixture() -> Vec<u8> {
	let mut builder = StreamBuilder::new()
		.f32(b"HTTP", 25.556)
		.f32(b"HTHI", 25.193)
		.i32(b"WDTP", 12)
		.bool(b"HTEV", false)
		.string(b"MATR", "Playfield")
		.bool(b"TMON", false)
		.i32(b"TMIN", 100)
		.wide_string(b"NAME", "Rubber1")
		.string(b"IMAG", "test_pattern")
		.f32(b"ELAS", 0.832)
		.f32(b"ELFO", 0.321)
		.f32(b"RFCT", 0.685)
		.f32(b"RSCT", 5.225)
		.bool(b"CLDR", true)
		.bool(b"RVIS", true)
		.bool(b"REEN", true)
		.bool(b"ESTR", true)
		.bool(b"ESIE", false)
		.f32(b"ROTX", 65.23)
		.f32(b"ROTY", 75.273)
		.f32(b"ROTZ", 70.962)
		.string(b"MAPH", "")
		.bool(b"OVPH", true)
		.bool(b"LOCK", false)
		.i32(b"LAYR", 0)
		.string(b"LANR", "Layer 1")
		.bool(b"LVIS", true)
		.tag_only(b"PNTS");

	for (x, y) in [(312.0, 1203.5), (402.25, 1188.0), (455.75, 1120.125)] {
		builder = builder.tag_only(b"DPNT").nested(&drag_point(x, y));
	}

	builder.end().finish()
}
