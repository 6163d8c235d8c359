use std::path::PathBuf;

use vpxdoc::vpx::{DecodeOptions, GameItem, Result, RubberData, decode_item};

use crate::cmd::util::{or_dash, print_json, read_input};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Input starts with a `u32` item-type prefix.
	#[arg(long)]
	pub item: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode and print a rubber item.
pub fn run(args: Args, options: &DecodeOptions) -> Result<()> {
	let Args { path, item, json } = args;

	let bytes = read_input(&path)?;
	let rubber: RubberData = if item {
		match GameItem::decode(&bytes, options)? {
			GameItem::Rubber(rubber) => rubber,
			other => {
				println!("item_type: {:?} (no decoder)", other.item_type());
				return Ok(());
			}
		}
	} else {
		decode_item(&bytes, options)?
	};

	if json {
		return print_json(&rubber);
	}

	println!("path: {}", path.display());
	println!("name: {}", or_dash(&rubber.name));
	println!("height: {}", rubber.height);
	println!("hit_height: {}", rubber.hit_height);
	println!("thickness: {}", rubber.thickness);
	println!("material: {}", or_dash(&rubber.material));
	println!("image: {}", or_dash(&rubber.image));
	println!("physics_material: {}", or_dash(&rubber.physics_material));
	println!("overwrite_physics: {}", rubber.overwrite_physics);
	println!(
		"physics: elasticity={} falloff={} friction={} scatter={}",
		rubber.elasticity, rubber.elasticity_falloff, rubber.friction, rubber.scatter
	);
	println!("rotation: {} {} {}", rubber.rot_x, rubber.rot_y, rubber.rot_z);
	println!(
		"flags: collidable={} visible={} reflection={} static={} hit_event={} show_in_editor={}",
		rubber.is_collidable, rubber.is_visible, rubber.is_reflection_enabled, rubber.static_rendering, rubber.hit_event, rubber.show_in_editor
	);
	println!("drag_points: {}", rubber.drag_points.len());
	for (idx, point) in rubber.drag_points.iter().enumerate() {
		println!(
			"  {idx}: ({}, {}, {}) smooth={} slingshot={}",
			point.vertex.x, point.vertex.y, point.vertex.z, point.is_smooth, point.is_slingshot
		);
	}

	Ok(())
}
