use serde::Serialize;

use crate::vpx::{BiffWriter, Cursor, DecodeOptions, Result, RubberData, VpxError, Writer, decode_item_from, write_item};

/// Kind of a table item, stored as a `u32` in front of its stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum ItemType {
	Surface = 0,
	Flipper = 1,
	Timer = 2,
	Plunger = 3,
	Textbox = 4,
	Bumper = 5,
	Trigger = 6,
	Light = 7,
	Kicker = 8,
	Decal = 9,
	Gate = 10,
	Spinner = 11,
	Ramp = 12,
	Table = 13,
	LightCenter = 14,
	DragPoint = 15,
	Collection = 16,
	DispReel = 17,
	LightSeq = 18,
	Primitive = 19,
	Flasher = 20,
	Rubber = 21,
	HitTarget = 22,
}

impl ItemType {
	/// Every item kind in discriminant order.
	pub const ALL: [ItemType; 23] = [
		Self::Surface,
		Self::Flipper,
		Self::Timer,
		Self::Plunger,
		Self::Textbox,
		Self::Bumper,
		Self::Trigger,
		Self::Light,
		Self::Kicker,
		Self::Decal,
		Self::Gate,
		Self::Spinner,
		Self::Ramp,
		Self::Table,
		Self::LightCenter,
		Self::DragPoint,
		Self::Collection,
		Self::DispReel,
		Self::LightSeq,
		Self::Primitive,
		Self::Flasher,
		Self::Rubber,
		Self::HitTarget,
	];
}

impl TryFrom<u32> for ItemType {
	type Error = VpxError;

	fn try_from(value: u32) -> Result<Self> {
		usize::try_from(value)
			.ok()
			.and_then(|index| Self::ALL.get(index).copied())
			.ok_or(VpxError::UnknownItemType { value })
	}
}

impl From<ItemType> for u32 {
	fn from(value: ItemType) -> Self {
		value as u32
	}
}

/// Item stream with its type prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameItem {
	/// Decoded rubber.
	Rubber(RubberData),
	/// Kinds without a decoder; the stream is kept verbatim.
	Other {
		/// Item kind.
		item_type: ItemType,
		/// Raw item stream after the prefix.
		#[serde(skip)]
		data: Vec<u8>,
	},
}

impl GameItem {
	/// Kind of this item.
	pub fn item_type(&self) -> ItemType {
		match self {
			Self::Rubber(_) => ItemType::Rubber,
			Self::Other { item_type, .. } => *item_type,
		}
	}

	/// Decode a type-prefixed item stream.
	pub fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);
		let item_type = ItemType::try_from(cursor.read_u32_le()?)?;

		match item_type {
			ItemType::Rubber => Ok(Self::Rubber(decode_item_from(&mut cursor, options, 0)?)),
			other => Ok(Self::Other {
				item_type: other,
				data: cursor.read_exact(cursor.remaining())?.to_vec(),
			}),
		}
	}

	/// Encode the type prefix followed by the item stream.
	pub fn encode(&self) -> Result<Vec<u8>> {
		let mut prefix = Writer::new();
		prefix.write_u32_le(self.item_type().into());

		let mut writer = BiffWriter::new();
		writer.write_raw(prefix.as_bytes());
		match self {
			Self::Rubber(rubber) => write_item(rubber, &mut writer)?,
			Self::Other { data, .. } => writer.write_raw(data),
		}
		Ok(writer.into_bytes())
	}
}
