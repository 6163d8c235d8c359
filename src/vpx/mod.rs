mod biff;
mod blob;
mod bytes;
mod dragpoint;
mod error;
mod fixed;
mod gameitem;
mod item;
mod material;
mod options;
mod resource;
mod rubber;
mod texture;

/// Chunk tags, chunk reader, and chunk writer.
pub use biff::{BiffWriter, Chunk, ChunkIter, Tag, read_chunk};
/// Binary payload holders and their content views.
pub use blob::{BinaryData, Bitmap, Blob};
/// Primitive field cursor and writer.
pub use bytes::{Cursor, Writer};
/// Drag point item and its vertex type.
pub use dragpoint::{DragPoint, Vertex3D};
/// Error and result aliases.
pub use error::{Result, VpxError};
/// Fixed-size record codec entry points.
pub use fixed::{FieldReader, FieldWriter, FixedRecord, RecordFault, decode_fixed, decode_fixed_table, encode_fixed, encode_fixed_table};
/// Item-type envelope around item streams.
pub use gameitem::{GameItem, ItemType};
/// Tag-table driven item decoding and encoding.
pub use item::{BiffItem, Field, NestedReader, TagSpec, decode_item, decode_item_from, encode_item, opens_nested_record, write_item};
/// Material records and quantization helpers.
pub use material::{MaterialData, PhysicsMaterialData, dequantize_unsigned, quantize_unsigned};
/// Decoder configuration.
pub use options::DecodeOptions;
/// Built-in texture resources.
pub use resource::{BuiltinTexture, MemoryResources, ResourceProvider};
/// Rubber part item.
pub use rubber::RubberData;
/// Texture item, blob views, and transparency statistics.
pub use texture::{Texture, TextureBlob, TextureData, TextureStats};
