use std::borrow::Cow;

use image::{ImageFormat, RgbaImage};
use serde::Serialize;

use crate::vpx::{BiffItem, Result, TagSpec, VpxError};

/// Opaque binary payload with an embedded view and a standalone-file view.
pub trait Blob {
	/// Payload as stored, without any file header.
	fn content(&self) -> &[u8];

	/// Payload as a standalone file, header included.
	fn file_content(&self) -> Result<Cow<'_, [u8]>>;
}

/// Embedded file, usually an image exactly as it was imported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BinaryData {
	/// Display name.
	pub name: String,
	/// Internal (lookup) name.
	pub internal_name: String,
	/// Original file path at import time.
	pub path: String,
	/// Declared byte size of `data`.
	pub size: i32,
	/// File bytes.
	#[serde(skip)]
	pub data: Vec<u8>,
}

impl BinaryData {
	/// Wrap file bytes, deriving `size` from them.
	pub fn from_file_bytes(name: &str, path: &str, data: Vec<u8>) -> Self {
		Self {
			name: name.to_owned(),
			internal_name: name.to_lowercase(),
			path: path.to_owned(),
			size: data.len() as i32,
			data,
		}
	}
}

type Spec = TagSpec<BinaryData>;

const FIELDS: &[Spec] = &[
	Spec::string(b"NAME", |blob| blob.name.as_str(), |blob, value| blob.name = value),
	Spec::string(b"INME", |blob| blob.internal_name.as_str(), |blob, value| blob.internal_name = value),
	Spec::string(b"PATH", |blob| blob.path.as_str(), |blob, value| blob.path = value),
	Spec::int(b"SIZE", |blob| blob.size, |blob, value| blob.size = value),
	Spec::bytes(b"DATA", |blob| blob.data.as_slice(), |blob, value| blob.data = value),
];

impl BiffItem for BinaryData {
	const NAME: &'static str = "BinaryData";

	fn fields() -> &'static [TagSpec<Self>] {
		FIELDS
	}
}

impl Blob for BinaryData {
	fn content(&self) -> &[u8] {
		&self.data
	}

	fn file_content(&self) -> Result<Cow<'_, [u8]>> {
		Ok(Cow::Borrowed(&self.data))
	}
}

/// Raw 32-bit BGRA pixels without a file header.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
	width: u32,
	height: u32,
	pixels: &'a [u8],
}

impl<'a> Bitmap<'a> {
	/// View `pixels` as a `width` x `height` BGRA image.
	pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self> {
		let expected = (width as usize).checked_mul(height as usize).and_then(|count| count.checked_mul(4));
		if expected != Some(pixels.len()) {
			return Err(VpxError::InvalidBitmap {
				width,
				height,
				len: pixels.len(),
			});
		}
		Ok(Self { width, height, pixels })
	}

	/// Width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}
}

impl Blob for Bitmap<'_> {
	fn content(&self) -> &[u8] {
		self.pixels
	}

	fn file_content(&self) -> Result<Cow<'_, [u8]>> {
		let mut rgba = self.pixels.to_vec();
		for pixel in rgba.chunks_exact_mut(4) {
			pixel.swap(0, 2);
		}

		let image = RgbaImage::from_raw(self.width, self.height, rgba).ok_or(VpxError::InvalidBitmap {
			width: self.width,
			height: self.height,
			len: self.pixels.len(),
		})?;

		let mut out = std::io::Cursor::new(Vec::new());
		image.write_to(&mut out, ImageFormat::Bmp)?;
		Ok(Cow::Owned(out.into_inner()))
	}
}
