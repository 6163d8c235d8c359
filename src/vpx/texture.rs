use std::borrow::Cow;

use image::{ImageFormat, ImageReader};
use serde::Serialize;

use crate::vpx::{BiffItem, BiffWriter, BinaryData, Bitmap, Blob, BuiltinTexture, NestedReader, ResourceProvider, Result, Tag, TagSpec, write_item};

const JPEG: Tag = Tag(*b"JPEG");

/// Sampling grid divisor used by [`Texture::stats`].
const SAMPLE_DIVISOR: usize = 10;

/// Image item as stored in a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureData {
	/// Display name.
	pub name: String,
	/// Internal (lookup) name.
	pub internal_name: String,
	/// Original file path at import time.
	pub path: String,
	/// Width in pixels.
	pub width: i32,
	/// Height in pixels.
	pub height: i32,
	/// Alpha below which pixels are discarded.
	pub alpha_test_value: f32,
	/// Non-zero when the image is linked rather than embedded.
	pub link: i32,
	/// Embedded image file.
	pub binary: Option<BinaryData>,
	/// Raw BGRA pixels, used when no file is embedded; empty when absent.
	#[serde(skip)]
	pub bits: Vec<u8>,
}

impl Default for TextureData {
	fn default() -> Self {
		Self {
			name: String::new(),
			internal_name: String::new(),
			path: String::new(),
			width: 0,
			height: 0,
			alpha_test_value: 1.0 / 255.0,
			link: 0,
			binary: None,
			bits: Vec::new(),
		}
	}
}

type Spec = TagSpec<TextureData>;

const FIELDS: &[Spec] = &[
	Spec::string(b"NAME", |texture| texture.name.as_str(), |texture, value| texture.name = value),
	Spec::string(
		b"INME",
		|texture| texture.internal_name.as_str(),
		|texture, value| texture.internal_name = value,
	),
	Spec::string(b"PATH", |texture| texture.path.as_str(), |texture, value| texture.path = value),
	Spec::int(b"WDTH", |texture| texture.width, |texture, value| texture.width = value),
	Spec::int(b"HGHT", |texture| texture.height, |texture, value| texture.height = value),
	Spec::float(
		b"ALTV",
		|texture| texture.alpha_test_value,
		|texture, value| texture.alpha_test_value = value,
	),
	Spec::int(b"LINK", |texture| texture.link, |texture, value| texture.link = value),
	Spec::record(b"JPEG", read_binary, write_binary),
	Spec::bytes(b"BITS", |texture| texture.bits.as_slice(), |texture, value| texture.bits = value),
];

fn read_binary(texture: &mut TextureData, reader: &mut NestedReader<'_, '_>) -> Result<()> {
	texture.binary = Some(reader.decode()?);
	Ok(())
}

fn write_binary(texture: &TextureData, writer: &mut BiffWriter) -> Result<()> {
	if let Some(binary) = &texture.binary {
		writer.write_tag(JPEG);
		write_item(binary, writer)?;
	}
	Ok(())
}

impl BiffItem for TextureData {
	const NAME: &'static str = "Texture";

	fn fields() -> &'static [TagSpec<Self>] {
		FIELDS
	}
}

/// Payload backing a texture: an embedded file, or raw pixels.
#[derive(Debug, Clone, Copy)]
pub enum TextureBlob<'a> {
	/// Embedded image file.
	Binary(&'a BinaryData),
	/// Header-less BGRA pixels.
	Bitmap(Bitmap<'a>),
}

impl Blob for TextureBlob<'_> {
	fn content(&self) -> &[u8] {
		match self {
			Self::Binary(binary) => binary.content(),
			Self::Bitmap(bitmap) => bitmap.content(),
		}
	}

	fn file_content(&self) -> Result<Cow<'_, [u8]>> {
		match self {
			Self::Binary(binary) => binary.file_content(),
			Self::Bitmap(bitmap) => bitmap.file_content(),
		}
	}
}

/// Pixel alpha counts gathered by [`Texture::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextureStats {
	/// Pixels with alpha 255.
	pub opaque: usize,
	/// Pixels with alpha strictly between 0 and 255.
	pub translucent: usize,
	/// Pixels with alpha 0.
	pub transparent: usize,
}

impl TextureStats {
	/// Number of sampled pixels.
	pub fn total(&self) -> usize {
		self.opaque + self.translucent + self.transparent
	}

	/// Share of translucent pixels; 0 when nothing was sampled.
	pub fn translucent_ratio(&self) -> f32 {
		ratio(self.translucent, self.total())
	}

	/// Share of transparent pixels; 0 when nothing was sampled.
	pub fn transparent_ratio(&self) -> f32 {
		ratio(self.transparent, self.total())
	}

	/// True when no sampled pixel had any transparency.
	pub fn is_opaque(&self) -> bool {
		self.translucent == 0 && self.transparent == 0
	}
}

fn ratio(count: usize, total: usize) -> f32 {
	if total == 0 { 0.0 } else { count as f32 / total as f32 }
}

/// Texture item plus the views derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
	/// Decoded item fields.
	pub data: TextureData,
}

impl Texture {
	/// Wrap decoded item fields.
	pub fn new(data: TextureData) -> Self {
		Self { data }
	}

	/// Build a texture from a built-in resource, or `None` when the provider lacks it.
	pub fn from_resource(texture: BuiltinTexture, provider: &dyn ResourceProvider) -> Option<Self> {
		let bytes = provider.load(texture)?.into_owned();
		let (width, height) = ImageReader::with_format(std::io::Cursor::new(bytes.as_slice()), ImageFormat::Png)
			.into_dimensions()
			.unwrap_or((0, 0));

		let file_name = texture.file_name();
		Some(Self::new(TextureData {
			name: texture.name().to_owned(),
			internal_name: texture.name().to_lowercase(),
			path: file_name.clone(),
			width: width as i32,
			height: height as i32,
			binary: Some(BinaryData::from_file_bytes(texture.name(), &file_name, bytes)),
			..TextureData::default()
		}))
	}

	/// Width in pixels.
	pub fn width(&self) -> i32 {
		self.data.width
	}

	/// Height in pixels.
	pub fn height(&self) -> i32 {
		self.data.height
	}

	/// Whether the source file was a high dynamic range image.
	pub fn is_hdr(&self) -> bool {
		let path = self.data.path.to_lowercase();
		path.ends_with(".hdr") || path.ends_with(".exr")
	}

	/// Payload view; an embedded file wins over raw pixels.
	pub fn blob(&self) -> Result<Option<TextureBlob<'_>>> {
		if let Some(binary) = &self.data.binary {
			return Ok(Some(TextureBlob::Binary(binary)));
		}
		if self.data.bits.is_empty() {
			return Ok(None);
		}

		let width = u32::try_from(self.data.width).unwrap_or(0);
		let height = u32::try_from(self.data.height).unwrap_or(0);
		Ok(Some(TextureBlob::Bitmap(Bitmap::new(width, height, &self.data.bits)?)))
	}

	/// Sample alpha of an embedded PNG.
	///
	/// Returns `None` unless the path ends in `.png` and the embedded file decodes.
	/// Sampling stops once more than `threshold` non-opaque pixels were seen.
	pub fn stats(&self, threshold: usize) -> Option<TextureStats> {
		if !self.data.path.to_lowercase().ends_with(".png") {
			return None;
		}

		let binary = self.data.binary.as_ref()?;
		let image = image::load_from_memory_with_format(&binary.data, ImageFormat::Png).ok()?.to_rgba8();
		let (width, height) = image.dimensions();
		Some(sample_alpha(image.as_raw(), width as usize, height as usize, threshold))
	}
}

/// Visit every pixel of an RGBA buffer in a strided order so an early stop still
/// covers the whole image coarsely.
fn sample_alpha(pixels: &[u8], width: usize, height: usize, threshold: usize) -> TextureStats {
	let mut stats = TextureStats::default();
	if width == 0 || height == 0 {
		return stats;
	}

	let dx = width.div_ceil(SAMPLE_DIVISOR);
	let dy = height.div_ceil(SAMPLE_DIVISOR);
	for yy in 0..dy {
		for xx in 0..dx {
			for y in (yy..height).step_by(dy) {
				for x in (xx..width).step_by(dx) {
					let Some(alpha) = pixels.get((y * width + x) * 4 + 3) else {
						return stats;
					};
					match *alpha {
						0 => stats.transparent += 1,
						255 => stats.opaque += 1,
						_ => stats.translucent += 1,
					}

					if stats.translucent + stats.transparent > threshold {
						return stats;
					}
				}
			}
		}
	}

	stats
}
