/// Runtime limits and behavior switches for record decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Reject fixed records whose reserved padding bytes are non-zero.
	pub strict_padding: bool,
	/// Maximum accepted chunk payload length in bytes.
	pub max_chunk_len: usize,
	/// Maximum nesting depth of sub-records (drag points, embedded images).
	pub max_nesting: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			strict_padding: true,
			max_chunk_len: 256 * 1024 * 1024,
			max_nesting: 8,
		}
	}
}

impl DecodeOptions {
	/// Preset for files written by tools that leave garbage in struct padding.
	pub fn lenient() -> Self {
		Self {
			strict_padding: false,
			..Self::default()
		}
	}
}
