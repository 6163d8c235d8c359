use serde::Serialize;

use crate::vpx::dragpoint::write_drag_points;
use crate::vpx::{BiffItem, DragPoint, NestedReader, Result, TagSpec};

/// Rubber band item: a tube swept along drag points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubberData {
	/// Item name.
	pub name: String,
	/// Height of the tube center above the playfield.
	pub height: f32,
	/// Height used for collision.
	pub hit_height: f32,
	/// Tube thickness.
	pub thickness: i32,
	/// Fire hit events on collision.
	pub hit_event: bool,
	/// Render material name.
	pub material: String,
	/// Script timer enabled.
	pub is_timer_enabled: bool,
	/// Script timer interval in milliseconds.
	pub timer_interval: i32,
	/// Texture name.
	pub image: String,
	/// Bounciness.
	pub elasticity: f32,
	/// Elasticity falloff with impact speed.
	pub elasticity_falloff: f32,
	/// Surface friction.
	pub friction: f32,
	/// Scatter angle in degrees.
	pub scatter: f32,
	/// Takes part in collision.
	pub is_collidable: bool,
	/// Rendered.
	pub is_visible: bool,
	/// Shows up in playfield reflections.
	pub is_reflection_enabled: bool,
	/// Rendered once into the static prepass.
	pub static_rendering: bool,
	/// Visible in the editor.
	pub show_in_editor: bool,
	/// Rotation around X in degrees.
	pub rot_x: f32,
	/// Rotation around Y in degrees.
	pub rot_y: f32,
	/// Rotation around Z in degrees.
	pub rot_z: f32,
	/// Physics material name.
	pub physics_material: String,
	/// Use the item's own physics values instead of the physics material.
	pub overwrite_physics: bool,
	/// Locked in the editor.
	pub is_locked: bool,
	/// Editor layer index.
	pub editor_layer: i32,
	/// Editor layer name.
	pub editor_layer_name: String,
	/// Editor layer visibility.
	pub editor_layer_visibility: bool,
	/// Path of the tube, in stream order.
	pub drag_points: Vec<DragPoint>,
}

impl Default for RubberData {
	fn default() -> Self {
		Self {
			name: String::new(),
			height: 25.0,
			hit_height: 25.0,
			thickness: 8,
			hit_event: false,
			material: String::new(),
			is_timer_enabled: false,
			timer_interval: 0,
			image: String::new(),
			elasticity: 0.0,
			elasticity_falloff: 0.0,
			friction: 0.0,
			scatter: 0.0,
			is_collidable: true,
			is_visible: true,
			is_reflection_enabled: true,
			static_rendering: true,
			show_in_editor: true,
			rot_x: 0.0,
			rot_y: 0.0,
			rot_z: 0.0,
			physics_material: String::new(),
			overwrite_physics: false,
			is_locked: false,
			editor_layer: 0,
			editor_layer_name: String::new(),
			editor_layer_visibility: true,
			drag_points: Vec::new(),
		}
	}
}

type Spec = TagSpec<RubberData>;

const FIELDS: &[Spec] = &[
	Spec::float(b"HTTP", |rubber| rubber.height, |rubber, value| rubber.height = value),
	Spec::float(b"HTHI", |rubber| rubber.hit_height, |rubber, value| rubber.hit_height = value),
	Spec::int(b"WDTP", |rubber| rubber.thickness, |rubber, value| rubber.thickness = value),
	Spec::boolean(b"HTEV", |rubber| rubber.hit_event, |rubber, value| rubber.hit_event = value),
	Spec::string(b"MATR", |rubber| rubber.material.as_str(), |rubber, value| rubber.material = value),
	Spec::boolean(b"TMON", |rubber| rubber.is_timer_enabled, |rubber, value| rubber.is_timer_enabled = value),
	Spec::int(b"TMIN", |rubber| rubber.timer_interval, |rubber, value| rubber.timer_interval = value),
	Spec::wide_string(b"NAME", |rubber| rubber.name.as_str(), |rubber, value| rubber.name = value),
	Spec::string(b"IMAG", |rubber| rubber.image.as_str(), |rubber, value| rubber.image = value),
	Spec::float(b"ELAS", |rubber| rubber.elasticity, |rubber, value| rubber.elasticity = value),
	Spec::float(b"ELFO", |rubber| rubber.elasticity_falloff, |rubber, value| rubber.elasticity_falloff = value),
	Spec::float(b"RFCT", |rubber| rubber.friction, |rubber, value| rubber.friction = value),
	Spec::float(b"RSCT", |rubber| rubber.scatter, |rubber, value| rubber.scatter = value),
	Spec::boolean(b"CLDR", |rubber| rubber.is_collidable, |rubber, value| rubber.is_collidable = value),
	Spec::boolean(b"RVIS", |rubber| rubber.is_visible, |rubber, value| rubber.is_visible = value),
	Spec::boolean(
		b"REEN",
		|rubber| rubber.is_reflection_enabled,
		|rubber, value| rubber.is_reflection_enabled = value,
	),
	Spec::boolean(b"ESTR", |rubber| rubber.static_rendering, |rubber, value| rubber.static_rendering = value),
	Spec::boolean(b"ESIE", |rubber| rubber.show_in_editor, |rubber, value| rubber.show_in_editor = value),
	Spec::float(b"ROTX", |rubber| rubber.rot_x, |rubber, value| rubber.rot_x = value),
	Spec::float(b"ROTY", |rubber| rubber.rot_y, |rubber, value| rubber.rot_y = value),
	Spec::float(b"ROTZ", |rubber| rubber.rot_z, |rubber, value| rubber.rot_z = value),
	Spec::string(
		b"MAPH",
		|rubber| rubber.physics_material.as_str(),
		|rubber, value| rubber.physics_material = value,
	),
	Spec::boolean(b"OVPH", |rubber| rubber.overwrite_physics, |rubber, value| rubber.overwrite_physics = value),
	Spec::boolean(b"LOCK", |rubber| rubber.is_locked, |rubber, value| rubber.is_locked = value),
	Spec::int(b"LAYR", |rubber| rubber.editor_layer, |rubber, value| rubber.editor_layer = value),
	Spec::string(
		b"LANR",
		|rubber| rubber.editor_layer_name.as_str(),
		|rubber, value| rubber.editor_layer_name = value,
	),
	Spec::boolean(
		b"LVIS",
		|rubber| rubber.editor_layer_visibility,
		|rubber, value| rubber.editor_layer_visibility = value,
	),
	Spec::marker(b"PNTS", |rubber| !rubber.drag_points.is_empty()),
	Spec::list(b"DPNT", read_drag_point, |rubber, writer| write_drag_points(&rubber.drag_points, writer)),
];

fn read_drag_point(rubber: &mut RubberData, reader: &mut NestedReader<'_, '_>) -> Result<()> {
	rubber.drag_points.push(reader.decode()?);
	Ok(())
}

impl BiffItem for RubberData {
	const NAME: &'static str = "Rubber";

	fn fields() -> &'static [TagSpec<Self>] {
		FIELDS
	}
}
