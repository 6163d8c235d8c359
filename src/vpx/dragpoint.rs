use serde::Serialize;

use crate::vpx::{BiffItem, BiffWriter, Result, Tag, TagSpec, write_item};

/// Point in table space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vertex3D {
	/// X coordinate.
	pub x: f32,
	/// Y coordinate.
	pub y: f32,
	/// Z coordinate (height).
	pub z: f32,
}

/// One control point of an item's outline or path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragPoint {
	/// Position; `VCEN` carries x/y, `POSZ` carries z.
	pub vertex: Vertex3D,
	/// Curve smoothly through this point.
	pub is_smooth: bool,
	/// Segment starting here acts as a slingshot.
	pub is_slingshot: bool,
	/// Derive the texture coordinate automatically.
	pub has_auto_texture: bool,
	/// Manual texture coordinate.
	pub tex_coord: f32,
	/// Locked in the editor.
	pub is_locked: bool,
	/// Editor layer index.
	pub editor_layer: i32,
	/// Editor layer name.
	pub editor_layer_name: String,
	/// Editor layer visibility.
	pub editor_layer_visibility: bool,
}

impl Default for DragPoint {
	fn default() -> Self {
		Self {
			vertex: Vertex3D::default(),
			is_smooth: false,
			is_slingshot: false,
			has_auto_texture: true,
			tex_coord: 0.0,
			is_locked: false,
			editor_layer: 0,
			editor_layer_name: String::new(),
			editor_layer_visibility: true,
		}
	}
}

impl DragPoint {
	/// Point at `(x, y, z)` with every other field defaulted.
	pub fn at(x: f32, y: f32, z: f32) -> Self {
		Self {
			vertex: Vertex3D { x, y, z },
			..Self::default()
		}
	}
}

/// Opener tag preceding each nested drag point stream.
pub(crate) const DPNT: Tag = Tag(*b"DPNT");

/// Write each point as a `DPNT` opener followed by its own stream.
pub(crate) fn write_drag_points(points: &[DragPoint], writer: &mut BiffWriter) -> Result<()> {
	for point in points {
		writer.write_tag(DPNT);
		write_item(point, writer)?;
	}
	Ok(())
}

type Spec = TagSpec<DragPoint>;

const FIELDS: &[Spec] = &[
	Spec::vec2(
		b"VCEN",
		|point| (point.vertex.x, point.vertex.y),
		|point, x, y| {
			point.vertex.x = x;
			point.vertex.y = y;
		},
	),
	Spec::float(b"POSZ", |point| point.vertex.z, |point, value| point.vertex.z = value),
	Spec::boolean(b"SMTH", |point| point.is_smooth, |point, value| point.is_smooth = value),
	Spec::boolean(b"SLNG", |point| point.is_slingshot, |point, value| point.is_slingshot = value),
	Spec::boolean(b"ATEX", |point| point.has_auto_texture, |point, value| point.has_auto_texture = value),
	Spec::float(b"TEXC", |point| point.tex_coord, |point, value| point.tex_coord = value),
	Spec::boolean(b"LOCK", |point| point.is_locked, |point, value| point.is_locked = value),
	Spec::int(b"LAYR", |point| point.editor_layer, |point, value| point.editor_layer = value),
	Spec::string(
		b"LANR",
		|point| point.editor_layer_name.as_str(),
		|point, value| point.editor_layer_name = value,
	),
	Spec::boolean(
		b"LVIS",
		|point| point.editor_layer_visibility,
		|point, value| point.editor_layer_visibility = value,
	),
];

impl BiffItem for DragPoint {
	const NAME: &'static str = "DragPoint";

	fn fields() -> &'static [TagSpec<Self>] {
		FIELDS
	}
}
